use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeZone, Utc};

use playerrest_interface::errors::{AppError, Result};
use playerrest_interface::players::model::{
    level_for, until_next_level, PageQuery, Player, PlayerDraft, PlayerFilter, PlayerOrder,
    PlayerParams, BIRTHDAY_MAX_YEAR, BIRTHDAY_MIN_YEAR, EXPERIENCE_MAX, NAME_MAX_LEN,
    TITLE_MAX_LEN,
};
use playerrest_interface::players::service::PlayersService;
use playerrest_interface::players::store::PlayerStoreHandle;

const DEFAULT_PAGE_SIZE: u32 = 3;

/// Catalog over a [`PlayerStore`]: validation, derived levels, and the
/// in-memory filter/sort/paginate pipeline all live here. The store is only
/// asked for full enumerations and single-record reads/writes.
///
/// [`PlayerStore`]: playerrest_interface::players::store::PlayerStore
#[derive(Clone)]
pub struct CatalogPlayersService {
    store: PlayerStoreHandle,
}

impl CatalogPlayersService {
    pub fn new(store: PlayerStoreHandle) -> Self {
        Self { store }
    }

    /// Full enumeration with every supplied predicate applied as a conjunction.
    async fn filtered(&self, filter: &PlayerFilter) -> Result<Vec<Player>> {
        let mut players = self.store.find_all().await?;

        if let Some(name) = &filter.name {
            let needle = name.to_lowercase();
            players.retain(|p| p.name.to_lowercase().contains(&needle));
        }
        if let Some(title) = &filter.title {
            let needle = title.to_lowercase();
            players.retain(|p| p.title.to_lowercase().contains(&needle));
        }
        if let Some(race) = filter.race {
            players.retain(|p| p.race == race);
        }
        if let Some(profession) = filter.profession {
            players.retain(|p| p.profession == profession);
        }
        if let Some(min_experience) = filter.min_experience {
            players.retain(|p| p.experience >= min_experience);
        }
        if let Some(max_experience) = filter.max_experience {
            players.retain(|p| p.experience <= max_experience);
        }
        if let Some(min_level) = filter.min_level {
            players.retain(|p| p.level >= min_level);
        }
        if let Some(max_level) = filter.max_level {
            players.retain(|p| p.level <= max_level);
        }
        if let Some(banned) = filter.banned {
            players.retain(|p| p.banned == banned);
        }
        // Strict inequalities on the birthday instant.
        if let Some(after) = filter.after {
            players.retain(|p| p.birthday.timestamp_millis() > after);
        }
        if let Some(before) = filter.before {
            players.retain(|p| p.birthday.timestamp_millis() < before);
        }

        Ok(players)
    }

    async fn find_existing(&self, id: u64) -> Result<Player> {
        validate_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                msg: format!("no player with id {id}"),
            })
    }
}

#[async_trait]
impl PlayersService for CatalogPlayersService {
    async fn list_players(&self, filter: PlayerFilter, page: PageQuery) -> Result<Vec<Player>> {
        let page_number = page.page_number.unwrap_or(0);
        let page_size = page.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(AppError::InvalidArgument {
                msg: "pageSize must be positive".to_string(),
            });
        }

        let mut players = self.filtered(&filter).await?;
        sort_players(&mut players, page.order.unwrap_or(PlayerOrder::Id));

        let (start, end) = page_window(players.len(), page_number, page_size);
        players.truncate(end);

        Ok(players.split_off(start))
    }

    async fn count_players(&self, filter: PlayerFilter) -> Result<u64> {
        Ok(self.filtered(&filter).await?.len() as u64)
    }

    async fn get_player(&self, id: u64) -> Result<Player> {
        self.find_existing(id).await
    }

    async fn create_player(&self, params: PlayerParams) -> Result<Player> {
        let name = required("name", params.name)?;
        validate_name(&name)?;
        let title = required("title", params.title)?;
        validate_title(&title)?;
        let race = required("race", params.race)?;
        let profession = required("profession", params.profession)?;
        let birthday = parse_birthday(required("birthday", params.birthday)?)?;
        let experience = required("experience", params.experience)?;
        validate_experience(experience)?;

        let level = level_for(experience);
        let draft = PlayerDraft {
            name,
            title,
            race,
            profession,
            birthday,
            banned: params.banned.unwrap_or(false),
            experience,
            level,
            until_next_level: until_next_level(level, experience),
        };

        let player = self.store.insert(draft).await?;
        tracing::info!(id = player.id, name = %player.name, "created player");

        Ok(player)
    }

    async fn update_player(&self, id: u64, params: PlayerParams) -> Result<Player> {
        let mut player = self.find_existing(id).await?;

        // Validate every supplied field before mutating anything, so a late
        // validation failure cannot leave a half-applied record behind.
        let birthday = params.birthday.map(parse_birthday).transpose()?;
        if let Some(experience) = params.experience {
            validate_experience(experience)?;
        }

        if let Some(name) = params.name {
            player.name = name;
        }
        if let Some(title) = params.title {
            player.title = title;
        }
        if let Some(race) = params.race {
            player.race = race;
        }
        if let Some(profession) = params.profession {
            player.profession = profession;
        }
        if let Some(birthday) = birthday {
            player.birthday = birthday;
        }
        if let Some(experience) = params.experience {
            player.experience = experience;
            player.level = level_for(experience);
            player.until_next_level = until_next_level(player.level, experience);
        }
        if let Some(banned) = params.banned {
            player.banned = banned;
        }

        let player = self.store.save(&player).await?;
        tracing::info!(id = player.id, "updated player");

        Ok(player)
    }

    async fn delete_player(&self, id: u64) -> Result<()> {
        validate_id(id)?;
        if !self.store.exists(id).await? {
            return Err(AppError::NotFound {
                msg: format!("no player with id {id}"),
            });
        }

        self.store.delete_by_id(id).await?;
        tracing::info!(id, "deleted player");

        Ok(())
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| AppError::InvalidArgument {
        msg: format!("{field} is required"),
    })
}

fn validate_id(id: u64) -> Result<()> {
    if id < 1 {
        return Err(AppError::InvalidArgument {
            msg: format!("player id must be positive, got {id}"),
        });
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
        return Err(AppError::InvalidArgument {
            msg: format!("name must be 1 to {NAME_MAX_LEN} characters"),
        });
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(AppError::InvalidArgument {
            msg: format!("title must be at most {TITLE_MAX_LEN} characters"),
        });
    }
    Ok(())
}

fn validate_experience(experience: i32) -> Result<()> {
    if !(0..=EXPERIENCE_MAX).contains(&experience) {
        return Err(AppError::InvalidArgument {
            msg: format!("experience must be within [0, {EXPERIENCE_MAX}]"),
        });
    }
    Ok(())
}

fn parse_birthday(millis: i64) -> Result<DateTime<Utc>> {
    let birthday =
        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| AppError::InvalidArgument {
                msg: format!("birthday {millis} is not a valid instant"),
            })?;

    let year = birthday.year();
    if !(BIRTHDAY_MIN_YEAR..=BIRTHDAY_MAX_YEAR).contains(&year) {
        return Err(AppError::InvalidArgument {
            msg: format!("birthday year must be within [{BIRTHDAY_MIN_YEAR}, {BIRTHDAY_MAX_YEAR}]"),
        });
    }

    Ok(birthday)
}

fn sort_players(players: &mut [Player], order: PlayerOrder) {
    // Vec::sort_by is stable, so equal keys keep their pre-sort order.
    match order {
        PlayerOrder::Name => players.sort_by(|a, b| a.name.cmp(&b.name)),
        PlayerOrder::Birthday => players.sort_by_key(|p| p.birthday),
        PlayerOrder::Level => players.sort_by_key(|p| p.level),
        PlayerOrder::Experience => players.sort_by_key(|p| p.experience),
        PlayerOrder::Id => players.sort_by_key(|p| p.id),
    }
}

/// Page window over a result set of `total` records. A page that would start
/// past the end is shifted left so the trailing records stay reachable
/// instead of producing an empty page.
fn page_window(total: usize, page_number: u32, page_size: u32) -> (usize, usize) {
    let page_size = page_size as usize;
    let nominal = (page_number as usize).saturating_mul(page_size);

    let start = if nominal <= total {
        nominal
    } else {
        total.saturating_sub(page_size)
    };
    let end = nominal.saturating_add(page_size).min(total);

    (start.min(end), end)
}
