use time::{Date, OffsetDateTime};

// `YYYY-MM-DD` for request bodies, query strings and responses.
time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::macros::date;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        #[serde(with = "iso_date")]
        day: Date,
        #[serde(default, with = "iso_date::option")]
        maybe: Option<Date>,
    }

    #[test]
    fn iso_date_round_trip() {
        let row: Row = serde_json::from_str(r#"{"day":"2024-02-29"}"#).unwrap();
        assert_eq!(row.day, date!(2024 - 02 - 29));
        assert_eq!(row.maybe, None);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"day":"2024-02-29","maybe":null}"#
        );
    }
}
