//! Cost and currency formatting.
//!
//! Emeralds are the base currency. Every cost is converted to an emerald
//! count once, through [`CurrencyUnit::base_multiplier`], and both the
//! display string and the sort key come from that value.

/// 1 emerald block = 9 emeralds.
pub const EMERALDS_PER_BLOCK: u64 = 9;

pub const COPPER_PER_EMERALD: u64 = 4;
pub const COPPER_PER_IRON: u64 = 9;
pub const IRON_PER_GOLD: u64 = 9;
pub const COPPER_PER_GOLD: u64 = COPPER_PER_IRON * IRON_PER_GOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyUnit {
    Emerald,
    EmeraldBlock,
    /// Any other item; its count is taken as-is.
    Other,
}

impl CurrencyUnit {
    /// Classify an item path (`emerald_block`) or display name (`Emerald Block`).
    pub fn from_item_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "emerald" => Self::Emerald,
            "emerald_block" => Self::EmeraldBlock,
            _ => Self::Other,
        }
    }

    pub fn base_multiplier(self) -> u64 {
        match self {
            Self::Emerald | Self::Other => 1,
            Self::EmeraldBlock => EMERALDS_PER_BLOCK,
        }
    }

    pub fn base_value(self, count: u64) -> u64 {
        count.saturating_mul(self.base_multiplier())
    }
}

/// Gold / iron / copper coin amounts equivalent to an emerald count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinBreakdown {
    pub gold: u64,
    pub iron: u64,
    pub copper: u64,
}

impl CoinBreakdown {
    pub fn total_copper(&self) -> u64 {
        self.gold * COPPER_PER_GOLD + self.iron * COPPER_PER_IRON + self.copper
    }
}

pub fn coin_breakdown(emeralds: u64) -> CoinBreakdown {
    let copper_total = emeralds.saturating_mul(COPPER_PER_EMERALD);
    let remainder = copper_total % COPPER_PER_GOLD;
    CoinBreakdown {
        gold: copper_total / COPPER_PER_GOLD,
        iron: remainder / COPPER_PER_IRON,
        copper: remainder % COPPER_PER_IRON,
    }
}

/// Replace underscores with spaces and capitalize each word. A letter is
/// upper-cased when the character before it is not a letter, so `tom's`
/// becomes `Tom'S` and `2x_boost` becomes `2X Boost`.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;
    for ch in raw.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

pub fn format_item_name(item_path: &str) -> String {
    // Tom's items collide with the "Ts." abbreviation once title cased.
    title_case(item_path).replace("Ts.", "Tom's")
}

pub fn format_mod_name(namespace: &str) -> String {
    title_case(namespace)
}

pub fn format_cost(count: u64, item_path: &str) -> String {
    format!("{count} x {}", title_case(item_path))
}

pub fn format_percentage(value: f64, decimal_places: usize) -> String {
    format!("{:.*}%", decimal_places, value * 100.0)
}

/// Emerald value of a `"<count> x <Item Name>"` string, 0 when it does not match.
pub fn parse_cost_value(cost: &str) -> u64 {
    let Some((count, item)) = cost.split_once(" x ") else {
        return 0;
    };
    let item = item.trim();
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) || item.is_empty() {
        return 0;
    }
    match count.parse::<u64>() {
        Ok(count) => CurrencyUnit::from_item_name(item).base_value(count),
        Err(_) => 0,
    }
}
