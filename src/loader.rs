//! Game discovery and script request planning
//!
//! Every game ships as a custom element named `ki-games-<game>` whose
//! defining script lives at `games/<tag>.js`. The loader finds the distinct
//! game tags on a page and works out which scripts still need requesting.

/// Tag prefix shared by all game elements
pub const GAME_TAG_PREFIX: &str = "ki-games-";
/// Directory holding game scripts, relative to the page
pub const GAMES_DIRECTORY: &str = "games/";

/// A script request to inject into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    pub tag: String,
    pub src: String,
}

/// Distinct game tags among `tag_names`, lowercased, in first-seen order
pub fn discover_game_tags<'a, I>(tag_names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Vec<String> = Vec::new();
    for name in tag_names {
        let tag = name.to_ascii_lowercase();
        if tag.starts_with(GAME_TAG_PREFIX) && !found.contains(&tag) {
            found.push(tag);
        }
    }
    found
}

/// `ki-games-invaders` -> `ki-games-invaders.js`
pub fn script_file_name(tag: &str) -> String {
    format!("{}.js", tag)
}

/// `ki-games-invaders` -> `games/ki-games-invaders.js`
pub fn script_path(tag: &str) -> String {
    format!("{}{}", GAMES_DIRECTORY, script_file_name(tag))
}

/// Whether any existing script `src` already references `file_name`
pub fn is_already_requested<S: AsRef<str>>(existing_srcs: &[S], file_name: &str) -> bool {
    existing_srcs.iter().any(|src| src.as_ref().contains(file_name))
}

/// Script requests still needed for the given page tags
pub fn plan_injections<'a, I, S>(tag_names: I, existing_srcs: &[S]) -> Vec<ScriptRequest>
where
    I: IntoIterator<Item = &'a str>,
    S: AsRef<str>,
{
    discover_game_tags(tag_names)
        .into_iter()
        .filter(|tag| !is_already_requested(existing_srcs, &script_file_name(tag)))
        .map(|tag| ScriptRequest {
            src: script_path(&tag),
            tag,
        })
        .collect()
}
