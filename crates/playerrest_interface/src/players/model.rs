use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 12;
pub const TITLE_MAX_LEN: usize = 30;
pub const BIRTHDAY_MIN_YEAR: i32 = 2000;
pub const BIRTHDAY_MAX_YEAR: i32 = 3000;
pub const EXPERIENCE_MAX: i32 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

/// Sort key for the list operation. The store id is the fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerOrder {
    Name,
    Birthday,
    Level,
    Experience,
    Id,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub birthday: DateTime<Utc>,
    pub banned: bool,
    pub experience: i32,
    // Derived from `experience`, recomputed on every experience change.
    pub level: i32,
    pub until_next_level: i32,
}

/// A fully validated player that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct PlayerDraft {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: DateTime<Utc>,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

impl PlayerDraft {
    pub fn into_player(self, id: u64) -> Player {
        Player {
            id,
            name: self.name,
            title: self.title,
            race: self.race,
            profession: self.profession,
            birthday: self.birthday,
            banned: self.banned,
            experience: self.experience,
            level: self.level,
            until_next_level: self.until_next_level,
        }
    }
}

/// Request body shared by create and update. Every field is optional so that
/// missing values reach the service layer and fail validation there instead
/// of being rejected as a deserialization error.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerParams {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Epoch milliseconds.
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
    pub experience: Option<i32>,
}

/// Query-string filter. Absent fields put no constraint on the result set;
/// supplied fields are combined as a conjunction.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFilter {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Birthday strictly after this epoch-millisecond instant.
    pub after: Option<i64>,
    /// Birthday strictly before this epoch-millisecond instant.
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub order: Option<PlayerOrder>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// Closed-form inverse of the quadratic experience curve: a player sits at
/// level `l` for experience in `[50*l*(l+1), 50*(l+1)*(l+2))`.
pub fn level_for(experience: i32) -> i32 {
    (((2500.0 + 200.0 * f64::from(experience)).sqrt() - 50.0) / 100.0) as i32
}

/// Experience still missing before the next level is reached.
pub fn until_next_level(level: i32, experience: i32) -> i32 {
    50 * (level + 1) * (level + 2) - experience
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn player_wire_format() {
        let player = Player {
            id: 7,
            name: "frodo".to_string(),
            title: "ring bearer".to_string(),
            race: Race::Hobbit,
            profession: Profession::Rogue,
            birthday: Utc.with_ymd_and_hms(2890, 9, 22, 0, 0, 0).unwrap(),
            banned: false,
            experience: 100,
            level: 1,
            until_next_level: 200,
        };

        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["race"], "HOBBIT");
        assert_eq!(json["profession"], "ROGUE");
        assert_eq!(json["untilNextLevel"], 200);
        assert_eq!(json["birthday"], player.birthday.timestamp_millis());
    }

    #[test]
    fn unknown_enum_tokens_are_rejected() {
        assert!(serde_json::from_str::<Race>("\"VULCAN\"").is_err());
        assert!(serde_json::from_str::<Profession>("\"BARISTA\"").is_err());

        let params: PlayerParams = serde_json::from_str("{\"race\":\"TROLL\"}").unwrap();
        assert_eq!(params.race, Some(Race::Troll));
    }

    #[test]
    fn level_curve_anchors() {
        assert_eq!(level_for(0), 0);
        assert_eq!(until_next_level(0, 0), 100);

        // Level 1 starts at exactly 100 experience.
        assert_eq!(level_for(99), 0);
        assert_eq!(until_next_level(0, 99), 1);
        assert_eq!(level_for(100), 1);
        assert_eq!(until_next_level(1, 100), 200);
    }

    #[test]
    fn level_curve_upper_bound() {
        let level = level_for(EXPERIENCE_MAX);
        assert!(50 * level * (level + 1) <= EXPERIENCE_MAX);
        assert!(50 * (level + 1) * (level + 2) > EXPERIENCE_MAX);
    }

    proptest! {
        #[test]
        fn prop_until_next_level_never_negative(experience in 0..=EXPERIENCE_MAX) {
            let level = level_for(experience);
            prop_assert!(until_next_level(level, experience) >= 0);
        }

        #[test]
        fn prop_level_monotone(a in 0..=EXPERIENCE_MAX, b in 0..=EXPERIENCE_MAX) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for(lo) <= level_for(hi));
        }

        #[test]
        fn prop_level_matches_quadratic_thresholds(experience in 0..=EXPERIENCE_MAX) {
            let level = level_for(experience);
            prop_assert!(50 * level * (level + 1) <= experience);
            prop_assert!(50 * (level + 1) * (level + 2) > experience);
        }
    }
}
