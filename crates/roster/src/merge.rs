//! Reconciles a page of remote characters with the local overlay.

use crate::model::Character;
use crate::overlay::DeletionSet;

/// Merge one remote page with the overlay.
///
/// Deleted ids are dropped from both sources. Local creations are only surfaced on page 1,
/// ahead of the remote records and in their stored (newest first) order.
pub fn merge_page(
  remote: Vec<Character>,
  page: u32,
  deleted: &DeletionSet,
  created: &[Character],
) -> Vec<Character> {
  let remote = remote.into_iter().filter(|character| !deleted.contains(character.id));

  if page != 1 {
    return remote.collect();
  }

  created
    .iter()
    .filter(|character| !deleted.contains(character.id))
    .cloned()
    .chain(remote)
    .collect()
}

/// Case-insensitive substring match on the character name. An empty filter keeps everything.
pub fn filter_by_name<'a>(characters: &'a [Character], filter: &str) -> Vec<&'a Character> {
  let needle = filter.to_lowercase();
  characters.iter().filter(|character| character.name.to_lowercase().contains(&needle)).collect()
}
