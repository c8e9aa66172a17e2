//! Human-readable renderings of listing fields.

/// Private store type.
#[must_use]
pub fn store_type(value: u8) -> String {
    match value {
        0 => "Sell".to_string(),
        1 => "Buy".to_string(),
        2 => "Package sell".to_string(),
        other => format!("Unknown ({other})"),
    }
}

/// Item `type2` category.
#[must_use]
pub fn item_type2(value: u8) -> String {
    let name = match value {
        0 => "WEAPON",
        1 => "SHIELD_ARMOR",
        2 => "ACCESSORY",
        3 => "QUEST",
        4 => "MONEY",
        5 => "OTHER",
        other => return format!("UNKNOWN_TYPE2({other})"),
    };
    name.to_string()
}

/// Shadow item mana.
#[must_use]
pub fn mana(value: i32) -> String {
    match value {
        -1 => "no mana/not shadow item".to_string(),
        0 => "shadow item expired".to_string(),
        seconds if seconds > 0 => format!("shadow item time: {seconds} seconds"),
        _ => "unknown mana value".to_string(),
    }
}

/// Remaining lifetime of a time-limited item.
#[must_use]
pub fn time(value: i32) -> String {
    match value {
        -9999 => "not time-limited".to_string(),
        -2_559_744 => "special time value".to_string(),
        seconds if seconds > 0 => format!(
            "time-limited: {}h {}m {}s remaining",
            seconds / 3600,
            seconds % 3600 / 60,
            seconds % 60
        ),
        _ => "unknown time value".to_string(),
    }
}

#[must_use]
pub fn equipped(value: u16) -> String {
    match value {
        0 => "not equipped".to_string(),
        1 => "equipped".to_string(),
        other => format!("unknown equipped({other})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_types() {
        assert_eq!(store_type(0), "Sell");
        assert_eq!(store_type(2), "Package sell");
        assert_eq!(store_type(9), "Unknown (9)");
    }

    #[test]
    fn type2_names() {
        assert_eq!(item_type2(1), "SHIELD_ARMOR");
        assert_eq!(item_type2(5), "OTHER");
        assert_eq!(item_type2(6), "UNKNOWN_TYPE2(6)");
    }

    #[test]
    fn mana_values() {
        assert_eq!(mana(-1), "no mana/not shadow item");
        assert_eq!(mana(0), "shadow item expired");
        assert_eq!(mana(30), "shadow item time: 30 seconds");
        assert_eq!(mana(-5), "unknown mana value");
    }

    #[test]
    fn time_values() {
        assert_eq!(time(-9999), "not time-limited");
        assert_eq!(time(-2_559_744), "special time value");
        assert_eq!(time(3_725), "time-limited: 1h 2m 5s remaining");
        assert_eq!(time(0), "unknown time value");
    }

    #[test]
    fn equipped_values() {
        assert_eq!(equipped(0), "not equipped");
        assert_eq!(equipped(1), "equipped");
        assert_eq!(equipped(4), "unknown equipped(4)");
    }
}
