//! Test fixtures: in-memory decks and on-disk data directories.

use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::domain::{Ayah, Deck, Word};

/// Deck for `surah` whose ayah `i + 1` holds `counts[i]` words.
///
/// Ids follow the real format: ayahs `S:A`, words `S:A:W`.
pub fn deck_with_word_counts(surah: u32, counts: &[usize]) -> Deck {
  let ayats = counts
    .iter()
    .enumerate()
    .map(|(ai, &n)| {
      let ayah_id = format!("{}:{}", surah, ai + 1);
      Ayah {
        arabic: format!("ayah {}", ayah_id),
        bangla: format!("translation {}", ayah_id),
        words: (0..n)
          .map(|wi| Word {
            word_id: format!("{}:{}", ayah_id, wi + 1),
            arabic_word: format!("word {}:{}", ayah_id, wi + 1),
            bangla_meaning: format!("meaning {}:{}", ayah_id, wi + 1),
            ..Default::default()
          })
          .collect(),
        ayah_id,
      }
    })
    .collect();
  Deck { ayats }
}

/// Temporary data directory with a manifest and deck files.
pub struct TestData {
  pub temp: TempDir,
}

impl TestData {
  /// Data directory containing `manifest.json` with two decks:
  /// `067-al-mulk.json` (2 ayahs: 2 + 1 words) and `112-al-ikhlas.json`
  /// (1 ayah, 3 words).
  pub fn new() -> std::io::Result<Self> {
    let temp = TempDir::new()?;
    let dir = temp.path();

    write_json(
      dir,
      "manifest.json",
      &json!([
        {"id": "67", "filename": "067-al-mulk.json", "display": "67 · Al-Mulk"},
        {"id": "112", "filename": "112-al-ikhlas.json", "name_bn": "আল-ইখলাস"}
      ]),
    )?;
    write_json(dir, "067-al-mulk.json", &sample_mulk())?;
    write_json(
      dir,
      "112-al-ikhlas.json",
      &json!({
        "ayats": [{
          "ayah_id": "112:1",
          "arabic": "قُلْ هُوَ اللَّهُ أَحَدٌ",
          "bangla": "বলুন, তিনি আল্লাহ, এক",
          "words": [
            {"word_id": "112:1:1", "arabic_word": "قُلْ", "bangla_meaning": "বলুন"},
            {"word_id": "112:1:2", "arabic_word": "هُوَ", "bangla_meaning": "তিনি"},
            {"word_id": "112:1:3", "arabic_word": "اللَّهُ", "bangla_meaning": "আল্লাহ"}
          ]
        }]
      }),
    )?;

    Ok(Self { temp })
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn write(&self, name: &str, contents: &str) -> std::io::Result<()> {
    fs::write(self.path().join(name), contents)
  }
}

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> std::io::Result<()> {
  fs::write(dir.join(name), value.to_string())
}

/// Two ayahs of Al-Mulk with full word metadata on the first word.
pub fn sample_mulk() -> serde_json::Value {
  json!({
    "ayats": [
      {
        "ayah_id": "67:1",
        "arabic": "تَبَارَكَ الَّذِي بِيَدِهِ الْمُلْكُ",
        "bangla": "বরকতময় তিনি, যাঁর হাতে রাজত্ব",
        "words": [
          {
            "word_id": "67:1:1",
            "arabic_word": "تَبَارَكَ",
            "bangla_meaning": "বরকতময়",
            "root": "ب ر ك",
            "rootMeaning": "বরকত, কল্যাণ",
            "derivationMethod": "ফে'ল মাযী",
            "quranicDerivations": [
              {"arabic": "مُبَارَك", "meaning": "বরকতময়", "occurrences": [{"ayah_id": "38:29"}, {"ayah_id": "6:92"}]},
              {"arabic": "بَرَكَات", "meaning": "বরকতসমূহ", "occurrences": [{"ayah_id": "7:96"}]}
            ],
            "audio": {"url": "/audio/67/1/1.mp3"},
            "tajweed": {"rules": [{"rule": "madd", "description": "two counts"}]}
          },
          {"word_id": "67:1:2", "arabic_word": "الَّذِي", "bangla_meaning": "যিনি"}
        ]
      },
      {
        "ayah_id": "67:2",
        "arabic": "الَّذِي خَلَقَ الْمَوْتَ وَالْحَيَاةَ",
        "bangla": "যিনি সৃষ্টি করেছেন মৃত্যু ও জীবন",
        "words": [
          {"word_id": "67:2:1", "arabic_word": "خَلَقَ", "bangla_meaning": "সৃষ্টি করেছেন"}
        ]
      }
    ]
  })
}
