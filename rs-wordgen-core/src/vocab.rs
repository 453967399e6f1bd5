use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Character vocabulary of a text corpus.
///
/// Holds the sorted set of distinct characters and the id lookups in both
/// directions. Ids are contiguous from 0 to `len - 1` and follow the
/// character sort order, so the same text always yields the same mapping.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Vocabulary {
	/// Distinct characters in sorted order; the index is the id.
	chars: Vec<char>,
	/// Reverse lookup from character to id.
	ids: HashMap<char, usize>,
}

impl Vocabulary {
	/// Builds the vocabulary of `text`.
	///
	/// Every distinct character is kept, whitespace included.
	pub fn from_text(text: &str) -> Self {
		let chars: Vec<char> = text.chars().collect::<BTreeSet<_>>().into_iter().collect();
		let ids = chars.iter().enumerate().map(|(id, c)| (*c, id)).collect();
		Self { chars, ids }
	}

	/// Returns the number of distinct characters.
	pub fn len(&self) -> usize {
		self.chars.len()
	}

	/// Returns `true` if the vocabulary is empty.
	pub fn is_empty(&self) -> bool {
		self.chars.is_empty()
	}

	/// Returns the characters in id order.
	pub fn chars(&self) -> &[char] {
		&self.chars
	}

	/// Returns the id of `c`, or `None` if it is not in the vocabulary.
	pub fn id_for(&self, c: char) -> Option<usize> {
		self.ids.get(&c).copied()
	}

	/// Returns the character for `id`, or `None` if it is out of range.
	pub fn char_for(&self, id: usize) -> Option<char> {
		self.chars.get(id).copied()
	}

	/// Encodes `text` into a sequence of character ids.
	///
	/// # Errors
	/// Returns an error on the first character outside the vocabulary.
	pub fn encode(&self, text: &str) -> Result<Vec<usize>, String> {
		text.chars()
			.map(|c| {
				self.id_for(c)
					.ok_or_else(|| format!("Character {:?} is not in the vocabulary", c))
			})
			.collect()
	}

	/// Decodes a sequence of ids back into a string.
	///
	/// # Errors
	/// Returns an error on the first id outside the vocabulary bounds.
	pub fn decode(&self, ids: &[usize]) -> Result<String, String> {
		ids.iter()
			.map(|id| {
				self.char_for(*id)
					.ok_or_else(|| format!("Id {} is out of vocabulary bounds", id))
			})
			.collect()
	}
}
