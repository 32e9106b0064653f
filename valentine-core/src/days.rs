//! The eight Valentine week days and how callers refer to them.
use serde::Serialize;

/// One themed day of the week. The catalog is compiled in and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub id: &'static str,
    /// Day of month on which the page opens.
    pub calendar_date: u32,
    /// 1-based month (February = 2).
    pub month: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
    pub color: &'static str,
}

pub const FEBRUARY: u32 = 2;

pub const DAY_COUNT: usize = 8;

pub static VALENTINE_DAYS: [DayEntry; DAY_COUNT] = [
    DayEntry {
        id: "rose",
        calendar_date: 7,
        month: FEBRUARY,
        name: "Rose Day",
        description: "Exchanging roses to express love",
        icon: "🌹",
        path: "/days/rose-day",
        color: "#FF1744",
    },
    DayEntry {
        id: "propose",
        calendar_date: 8,
        month: FEBRUARY,
        name: "Propose Day",
        description: "Confessing feelings",
        icon: "💍",
        path: "/days/propose-day",
        color: "#FF4081",
    },
    DayEntry {
        id: "chocolate",
        calendar_date: 9,
        month: FEBRUARY,
        name: "Chocolate Day",
        description: "Sharing sweet moments",
        icon: "🍫",
        path: "/days/chocolate-day",
        color: "#795548",
    },
    DayEntry {
        id: "teddy",
        calendar_date: 10,
        month: FEBRUARY,
        name: "Teddy Day",
        description: "Comfort and care",
        icon: "🧸",
        path: "/days/teddy-day",
        color: "#FF94C2",
    },
    DayEntry {
        id: "promise",
        calendar_date: 11,
        month: FEBRUARY,
        name: "Promise Day",
        description: "Meaningful commitments",
        icon: "🤞",
        path: "/days/promise-day",
        color: "#9C27B0",
    },
    DayEntry {
        id: "hug",
        calendar_date: 12,
        month: FEBRUARY,
        name: "Hug Day",
        description: "Emotional support",
        icon: "🤗",
        path: "/days/hug-day",
        color: "#E91E63",
    },
    DayEntry {
        id: "kiss",
        calendar_date: 13,
        month: FEBRUARY,
        name: "Kiss Day",
        description: "Deepening connections",
        icon: "💋",
        path: "/days/kiss-day",
        color: "#F50057",
    },
    DayEntry {
        id: "valentine",
        calendar_date: 14,
        month: FEBRUARY,
        name: "Valentine's Day",
        description: "The grand finale",
        icon: "💘",
        path: "/days/valentine-day",
        color: "#FF1744",
    },
];

/// Chain order used when a finished mini-game opens the next page.
/// Deliberately not the calendar order.
pub const DEFAULT_ORDER: [&str; DAY_COUNT] = [
    "rose",
    "kiss",
    "chocolate",
    "teddy",
    "hug",
    "promise",
    "propose",
    "valentine",
];

/// A day referenced either by slug or by its day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRef<'a> {
    Id(&'a str),
    Date(u32),
}

impl<'a> From<&'a str> for DayRef<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a String> for DayRef<'a> {
    fn from(id: &'a String) -> Self {
        Self::Id(id.as_str())
    }
}

impl From<u32> for DayRef<'_> {
    fn from(date: u32) -> Self {
        Self::Date(date)
    }
}

impl DayRef<'_> {
    /// Resolve against the catalog. Unknown ids and dates yield `None`.
    #[must_use]
    pub fn resolve(self) -> Option<&'static DayEntry> {
        match self {
            Self::Id(id) => find_day(id),
            Self::Date(date) => VALENTINE_DAYS.iter().find(|d| d.calendar_date == date),
        }
    }
}

#[must_use]
pub fn find_day(id: &str) -> Option<&'static DayEntry> {
    VALENTINE_DAYS.iter().find(|d| d.id == id)
}

/// Map an arbitrary string onto the catalog's `'static` id, if it names a day.
#[must_use]
pub fn canonical_id(id: &str) -> Option<&'static str> {
    find_day(id).map(|d| d.id)
}

#[must_use]
pub fn is_known_day(id: &str) -> bool {
    find_day(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique_and_dates_ascend() {
        let ids: HashSet<_> = VALENTINE_DAYS.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), VALENTINE_DAYS.len());
        for pair in VALENTINE_DAYS.windows(2) {
            assert!(pair[0].calendar_date < pair[1].calendar_date);
        }
        assert!(VALENTINE_DAYS.iter().all(|d| d.month == FEBRUARY));
    }

    #[test]
    fn default_order_is_a_permutation_of_the_catalog() {
        let order: HashSet<_> = DEFAULT_ORDER.iter().copied().collect();
        let ids: HashSet<_> = VALENTINE_DAYS.iter().map(|d| d.id).collect();
        assert_eq!(order.len(), DEFAULT_ORDER.len());
        assert_eq!(order, ids);
    }

    #[test]
    fn day_ref_resolves_ids_and_dates() {
        assert_eq!(DayRef::from("kiss").resolve().map(|d| d.calendar_date), Some(13));
        assert_eq!(DayRef::from(9_u32).resolve().map(|d| d.id), Some("chocolate"));
        assert!(DayRef::from("birthday").resolve().is_none());
        assert!(DayRef::from(15_u32).resolve().is_none());
    }
}
