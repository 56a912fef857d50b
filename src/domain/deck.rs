use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Treat an explicit JSON `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Numbers and booleans are shown as written; `null`, arrays and objects
/// carry no text.
fn scalar_text(value: Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Value::deserialize(deserializer).map(|v| scalar_text(v).unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  Value::deserialize(deserializer).map(scalar_text)
}

/// A list that is not the expected shape reads as empty instead of failing
/// the whole deck. Used for annotation lists, not for `ayats`/`words`.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: serde::de::DeserializeOwned,
{
  let value = Value::deserialize(deserializer)?;
  if value.is_null() {
    return Ok(Vec::new());
  }
  Ok(serde_json::from_value(value).unwrap_or_else(|e| {
    tracing::debug!("Ignoring malformed list in deck: {}", e);
    Vec::new()
  }))
}

/// One surah's worth of study material, as read from a deck JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
  #[serde(default, deserialize_with = "nullable")]
  pub ayats: Vec<Ayah>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ayah {
  /// `surah:ayah`
  #[serde(default, deserialize_with = "text")]
  pub ayah_id: String,
  #[serde(default, deserialize_with = "text")]
  pub arabic: String,
  #[serde(default, deserialize_with = "text")]
  pub bangla: String,
  #[serde(default, deserialize_with = "nullable")]
  pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Word {
  /// `surah:ayah:word`
  #[serde(default, deserialize_with = "text")]
  pub word_id: String,
  #[serde(default, deserialize_with = "text")]
  pub arabic_word: String,
  #[serde(default, deserialize_with = "text")]
  pub bangla_meaning: String,
  #[serde(default, deserialize_with = "optional_text")]
  pub root: Option<String>,
  #[serde(default, rename = "rootMeaning", deserialize_with = "optional_text")]
  pub root_meaning: Option<String>,
  #[serde(default, rename = "derivationMethod", deserialize_with = "optional_text")]
  pub derivation_method: Option<String>,
  #[serde(default, rename = "quranicDerivations", deserialize_with = "lenient_list")]
  pub quranic_derivations: Vec<DerivationRecord>,
  /// Free-form tajweed annotation, interpreted by [`super::annotations`]
  #[serde(default)]
  pub tajweed: Option<serde_json::Value>,
  /// Free-form audio annotation, interpreted by [`super::annotations`]
  #[serde(default)]
  pub audio: Option<serde_json::Value>,
}

/// An Arabic form sharing the word's root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivationRecord {
  #[serde(default, deserialize_with = "text")]
  pub arabic: String,
  #[serde(default, deserialize_with = "text")]
  pub meaning: String,
  #[serde(default, rename = "exampleArabic", deserialize_with = "optional_text")]
  pub example_arabic: Option<String>,
  #[serde(default, rename = "exampleBangla", deserialize_with = "optional_text")]
  pub example_bangla: Option<String>,
  #[serde(default, deserialize_with = "lenient_list")]
  pub occurrences: Vec<Occurrence>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
  #[serde(default, deserialize_with = "text")]
  pub ayah_id: String,
}

impl Deck {
  /// Build a deck from an already-parsed JSON document.
  ///
  /// A document that does not have the ayah/word shape yields an empty deck
  /// rather than an error; the viewer shows that as "no data". Text fields
  /// of the wrong type are read leniently and never discard the deck.
  pub fn from_value(value: serde_json::Value) -> Self {
    match serde_json::from_value(value) {
      Ok(deck) => deck,
      Err(e) => {
        tracing::warn!("Deck document has unexpected structure, treating as empty: {}", e);
        Self::default()
      }
    }
  }

  /// Parse deck JSON text. Only syntax errors are reported; structural
  /// mismatches produce an empty deck (see [`Deck::from_value`]).
  pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    Ok(Self::from_value(value))
  }

  pub fn word_count(&self) -> usize {
    self.ayats.iter().map(|a| a.words.len()).sum()
  }
}

impl Ayah {
  /// Surah and ayah numbers parsed from `ayah_id`, if well formed.
  pub fn surah_and_ayah(&self) -> Option<(u32, u32)> {
    let mut parts = self.ayah_id.split(':');
    let surah = parts.next()?.trim().parse().ok()?;
    let ayah = parts.next()?.trim().parse().ok()?;
    Some((surah, ayah))
  }
}

impl DerivationRecord {
  /// Occurrence references joined for display, e.g. `67:1, 67:3`.
  pub fn occurrence_list(&self) -> String {
    self
      .occurrences
      .iter()
      .map(|o| o.ayah_id.as_str())
      .collect::<Vec<_>>()
      .join(", ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_parse_full_word() {
    let deck = Deck::from_value(json!({
      "ayats": [{
        "ayah_id": "67:1",
        "arabic": "تَبَارَكَ الَّذِي بِيَدِهِ الْمُلْكُ",
        "bangla": "বরকতময় তিনি",
        "words": [{
          "word_id": "67:1:1",
          "arabic_word": "تَبَارَكَ",
          "bangla_meaning": "বরকতময়",
          "root": "ب ر ك",
          "rootMeaning": "বরকত",
          "derivationMethod": "ফে'ল মাযী",
          "quranicDerivations": [{
            "arabic": "مُبَارَك",
            "meaning": "বরকতময়",
            "exampleArabic": "كِتَابٌ أَنزَلْنَاهُ إِلَيْكَ مُبَارَكٌ",
            "occurrences": [{"ayah_id": "38:29"}, {"ayah_id": "6:92"}]
          }],
          "audio": {"url": "/audio/67_1_1.mp3"}
        }]
      }]
    }));

    assert_eq!(deck.ayats.len(), 1);
    let word = &deck.ayats[0].words[0];
    assert_eq!(word.root.as_deref(), Some("ب ر ك"));
    assert_eq!(word.root_meaning.as_deref(), Some("বরকত"));
    assert_eq!(word.derivation_method.as_deref(), Some("ফে'ল মাযী"));
    assert_eq!(word.quranic_derivations.len(), 1);
    assert!(word.quranic_derivations[0].example_bangla.is_none());
    assert_eq!(word.quranic_derivations[0].occurrence_list(), "38:29, 6:92");
    assert!(word.audio.is_some());
    assert!(word.tajweed.is_none());
  }

  #[test]
  fn test_missing_ayats_is_empty() {
    let deck = Deck::from_value(json!({"surah": 67}));
    assert!(deck.ayats.is_empty());
    assert_eq!(deck.word_count(), 0);
  }

  #[test]
  fn test_missing_words_is_empty_ayah() {
    let deck = Deck::from_value(json!({"ayats": [{"ayah_id": "1:1"}]}));
    assert_eq!(deck.ayats.len(), 1);
    assert!(deck.ayats[0].words.is_empty());
  }

  #[test]
  fn test_nulls_treated_as_missing() {
    let deck = Deck::from_value(json!({
      "ayats": [{"ayah_id": "1:1", "arabic": null, "words": [{"arabic_word": null, "quranicDerivations": null}]}]
    }));
    assert_eq!(deck.ayats[0].arabic, "");
    assert_eq!(deck.ayats[0].words[0].arabic_word, "");
    assert!(deck.ayats[0].words[0].quranic_derivations.is_empty());
  }

  #[test]
  fn test_wrong_shape_is_empty() {
    assert_eq!(Deck::from_value(json!({"ayats": "nope"})), Deck::default());
    assert_eq!(Deck::from_value(json!([1, 2, 3])), Deck::default());
    assert_eq!(Deck::from_value(json!(null)), Deck::default());
  }

  #[test]
  fn test_wrong_typed_fields_keep_every_card() {
    let deck = Deck::from_value(json!({
      "ayats": [
        {
          "ayah_id": "1:1",
          "arabic": 7,
          "words": [
            {"word_id": "1:1:1", "arabic_word": "بِسْمِ", "root": 5, "rootMeaning": ["x"]},
            {"word_id": "1:1:2", "derivationMethod": true, "quranicDerivations": "none"}
          ]
        },
        {
          "ayah_id": "1:2",
          "words": [{
            "word_id": "1:2:1",
            "bangla_meaning": {"text": "?"},
            "quranicDerivations": [{"arabic": "حَمْد", "exampleArabic": 3, "occurrences": "1:2"}]
          }]
        }
      ]
    }));

    assert_eq!(deck.word_count(), 3);
    let first = &deck.ayats[0];
    assert_eq!(first.arabic, "7");
    assert_eq!(first.words[0].arabic_word, "بِسْمِ");
    assert_eq!(first.words[0].root.as_deref(), Some("5"));
    assert!(first.words[0].root_meaning.is_none());
    assert_eq!(first.words[1].derivation_method.as_deref(), Some("true"));
    assert!(first.words[1].quranic_derivations.is_empty());

    let word = &deck.ayats[1].words[0];
    assert_eq!(word.bangla_meaning, "");
    assert_eq!(word.quranic_derivations[0].arabic, "حَمْد");
    assert_eq!(word.quranic_derivations[0].example_arabic.as_deref(), Some("3"));
    assert!(word.quranic_derivations[0].occurrences.is_empty());
  }

  #[test]
  fn test_from_json_str_syntax_error() {
    assert!(Deck::from_json_str("{ not json").is_err());
    assert!(Deck::from_json_str("{}").unwrap().ayats.is_empty());
  }

  #[test]
  fn test_word_count_sums_ayahs() {
    let deck = Deck::from_value(json!({
      "ayats": [
        {"ayah_id": "1:1", "words": [{}, {}, {}]},
        {"ayah_id": "1:2", "words": []},
        {"ayah_id": "1:3", "words": [{}, {}]}
      ]
    }));
    assert_eq!(deck.word_count(), 5);
  }

  #[test]
  fn test_surah_and_ayah() {
    let ayah = Ayah { ayah_id: "2:255".to_string(), ..Default::default() };
    assert_eq!(ayah.surah_and_ayah(), Some((2, 255)));

    let bad = Ayah { ayah_id: "two:255".to_string(), ..Default::default() };
    assert_eq!(bad.surah_and_ayah(), None);

    let short = Ayah { ayah_id: "2".to_string(), ..Default::default() };
    assert_eq!(short.surah_and_ayah(), None);
  }
}
