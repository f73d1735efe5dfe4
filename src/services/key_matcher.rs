//! Naming conventions for objects in the bucket.
//!
//! Two conventions are recognized:
//! - videos: any key ending in `.mp4`, `.mov` or `.webm` (case-insensitive)
//! - player assets: exactly `<root><group>/<NN>_<CCC>.png`, where `root` is the
//!   configured players prefix (`players/` by default), `NN` is two ASCII
//!   digits and `CCC` is three characters (`.png` case-insensitive)
//!
//! Keys that match neither convention are not errors, callers simply skip them.

const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "webm"];
const PNG_SUFFIX: &str = ".png";
const GAME_NUMBER_DIGITS: usize = 2;
const USER_CODE_CHARS: usize = 3;

/// Structured fields decoded from a player asset key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAssetKey<'a> {
    pub folder: &'a str,
    pub game_number: &'a str,
    pub user_code: &'a str,
}

/// True if `key` names a video file. The whole key is inspected; only the
/// extension after the final `.` matters.
pub fn is_video_key(key: &str) -> bool {
    match key.rsplit_once('.') {
        Some((_, ext)) => VIDEO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate)),
        None => false,
    }
}

/// Decompose a player asset key, or `None` if the whole key does not follow
/// `<root><group>/<NN>_<CCC>.png`. `root` must end with `/`.
pub fn match_player_asset<'a>(key: &'a str, root: &str) -> Option<PlayerAssetKey<'a>> {
    let rest = key.strip_prefix(root)?;
    let (folder, filename) = rest.split_once('/')?;
    if folder.is_empty() || filename.contains('/') {
        return None;
    }

    let stem = strip_suffix_ignore_ascii_case(filename, PNG_SUFFIX)?;
    let (game_number, user_code) = stem.split_once('_')?;

    let digits_ok = game_number.len() == GAME_NUMBER_DIGITS
        && game_number.bytes().all(|b| b.is_ascii_digit());
    if !digits_ok || user_code.chars().count() != USER_CODE_CHARS {
        return None;
    }

    Some(PlayerAssetKey {
        folder,
        game_number,
        user_code,
    })
}

fn strip_suffix_ignore_ascii_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
