use crate::types::{ActivityOption, ActivityRaw};
use tracing::debug;

/// Map a fixture activity into an [`ActivityOption`].
///
/// Blank theme tags are dropped and an empty image becomes `None`.
pub fn normalize_activity(raw: &ActivityRaw) -> ActivityOption {
    let themes = raw
        .theme
        .iter()
        .map(|theme| theme.trim())
        .filter(|theme| !theme.is_empty())
        .map(str::to_string)
        .collect();
    let image_url = Some(raw.image.trim())
        .filter(|image| !image.is_empty())
        .map(str::to_string);

    debug!(target: "trip_office::mapping", activity_id = %raw.id, "normalized activity");

    ActivityOption {
        id: raw.id.clone(),
        name: raw.name.clone(),
        city: raw.city.clone(),
        themes,
        price_usd: raw.price_usd,
        duration_hours: raw.duration_hr,
        image_url,
    }
}

impl ActivityOption {
    pub fn to_raw(&self) -> ActivityRaw {
        ActivityRaw {
            id: self.id.clone(),
            name: self.name.clone(),
            city: self.city.clone(),
            theme: self.themes.clone(),
            price_usd: self.price_usd,
            duration_hr: self.duration_hours,
            image: self.image_url.clone().unwrap_or_default(),
        }
    }
}
