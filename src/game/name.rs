use crate::NAME_MAX_LEN;

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Keep `[A-Za-z0-9_-]` in order, up to `NAME_MAX_LEN` kept characters.
pub fn sanitize_player_name(raw: &str) -> String {
    raw.chars()
        .filter(|ch| is_name_char(*ch))
        .take(NAME_MAX_LEN)
        .collect()
}
