//! Badges derived from the visit list. Nothing here is persisted.
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// At most every badge at once, so this never spills to the heap.
pub type Achievements = SmallVec<[Achievement; 6]>;

pub const FIRST_STEP: Achievement = Achievement {
    id: "first_step",
    name: "First Step",
    icon: "👣",
};
pub const HALFWAY: Achievement = Achievement {
    id: "halfway",
    name: "Halfway There",
    icon: "⭐",
};
pub const COMPLETIONIST: Achievement = Achievement {
    id: "completionist",
    name: "Love Journey Complete",
    icon: "👑",
};
pub const ROSE_COLLECTOR: Achievement = Achievement {
    id: "rose_collector",
    name: "Rose Collector",
    icon: "🌹",
};
pub const CHOCOLATE_LOVER: Achievement = Achievement {
    id: "chocolate_lover",
    name: "Chocolate Lover",
    icon: "🍫",
};
pub const KISS_MASTER: Achievement = Achievement {
    id: "kiss_master",
    name: "Kiss Master",
    icon: "💋",
};

const VISIT_THRESHOLDS: [(usize, Achievement); 3] =
    [(1, FIRST_STEP), (4, HALFWAY), (8, COMPLETIONIST)];

const DAY_BADGES: [(&str, Achievement); 3] = [
    ("rose", ROSE_COLLECTOR),
    ("chocolate", CHOCOLATE_LOVER),
    ("kiss", KISS_MASTER),
];

/// Every badge in display order, earned or not.
pub const ALL_ACHIEVEMENTS: [Achievement; 6] = [
    FIRST_STEP,
    HALFWAY,
    COMPLETIONIST,
    ROSE_COLLECTOR,
    CHOCOLATE_LOVER,
    KISS_MASTER,
];

/// Badges earned by a visit list: count thresholds first, then per-day badges.
#[must_use]
pub fn earned(visited: &[&str]) -> Achievements {
    let by_count = VISIT_THRESHOLDS
        .iter()
        .filter(|(min, _)| visited.len() >= *min)
        .map(|(_, badge)| *badge);
    let by_day = DAY_BADGES
        .iter()
        .filter(|(day, _)| visited.contains(day))
        .map(|(_, badge)| *badge);
    by_count.chain(by_day).collect()
}
