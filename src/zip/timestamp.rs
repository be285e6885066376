use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// Packed MS-DOS date and time, as stored in ZIP headers.
///
/// The date field packs `(year - 1980) << 9 | month << 5 | day` and the time
/// field packs `hour << 11 | minute << 5 | second / 2`, so seconds have a
/// two-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DosDateTime {
    date: u16,
    time: u16,
}

impl DosDateTime {
    /// Earliest representable year.
    pub const MIN_YEAR: u16 = 1980;
    /// Latest representable year (7-bit offset field).
    pub const MAX_YEAR: u16 = 2107;

    /// Pack calendar fields.
    ///
    /// `month` is 1-12, `day` is the 1-based day of the month and `hour` uses
    /// the 24-hour clock. Years outside 1980-2107 cannot be represented;
    /// clamping them is the caller's job (see [`from_datetime`](Self::from_datetime)).
    pub const fn from_calendar(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        let date = (year.saturating_sub(Self::MIN_YEAR) << 9) | ((month as u16) << 5) | day as u16;
        let time = ((hour as u16) << 11) | ((minute as u16) << 5) | (second / 2) as u16;
        Self { date, time }
    }

    /// Pack a calendar timestamp, clamping it into the representable range
    /// 1980-01-01 00:00:00 ..= 2107-12-31 23:59:58.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        let datetime = datetime.clamp(Self::earliest(), Self::latest());
        Self::from_calendar(
            datetime.year() as u16,
            datetime.month() as u8,
            datetime.day() as u8,
            datetime.hour() as u8,
            datetime.minute() as u8,
            datetime.second() as u8,
        )
    }

    /// The current local wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Raw packed date field.
    pub fn date(&self) -> u16 {
        self.date
    }

    /// Raw packed time field.
    pub fn time(&self) -> u16 {
        self.time
    }

    /// Decode the date field to (year, month, day)
    pub fn calendar_date(&self) -> (u16, u8, u8) {
        let day = (self.date & 0x1F) as u8;
        let month = ((self.date >> 5) & 0x0F) as u8;
        let year = ((self.date >> 9) & 0x7F) + Self::MIN_YEAR;
        (year, month, day)
    }

    /// Decode the time field to (hour, minute, second)
    pub fn clock_time(&self) -> (u8, u8, u8) {
        let second = ((self.time & 0x1F) * 2) as u8;
        let minute = ((self.time >> 5) & 0x3F) as u8;
        let hour = ((self.time >> 11) & 0x1F) as u8;
        (hour, minute, second)
    }

    fn earliest() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(Self::MIN_YEAR as i32, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    fn latest() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(Self::MAX_YEAR as i32, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 58))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

impl From<NaiveDateTime> for DosDateTime {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_datetime(datetime)
    }
}
