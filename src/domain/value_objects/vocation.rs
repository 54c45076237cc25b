//! Character vocation names.

/// Display name for a vocation id as stored in `players.vocation`.
pub fn vocation_name(vocation_id: i32) -> &'static str {
    match vocation_id {
        0 => "None",
        1 => "Sorcerer",
        2 => "Druid",
        3 => "Paladin",
        4 => "Knight",
        5 => "Master Sorcerer",
        6 => "Elder Druid",
        7 => "Royal Paladin",
        8 => "Elite Knight",
        _ => "Unknown",
    }
}
