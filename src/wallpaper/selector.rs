//! Candidate enumeration and random selection
//!
//! Enumerates image files recursively under the wallpaper folder and draws
//! one uniformly at random. The candidate set is recomputed on every request,
//! never cached, so folder edits take effect on the next cycle.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extensions accepted as wallpaper candidates (matched case-insensitively)
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "tiff", "bmp"];

/// Check whether a path carries a supported image extension
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Enumerate all candidate image files under `folder`, recursively
///
/// Unreadable entries are skipped with a warning rather than aborting the
/// walk. Entries are visited in file-name order so the same folder contents
/// always produce the same candidate list (a seeded selector then draws
/// deterministically).
pub fn collect_candidates(folder: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_file() && is_supported(path) {
                    candidates.push(path.to_path_buf());
                }
            }
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", folder.display(), e);
            }
        }
    }

    debug!(
        "Found {} wallpaper candidates under {}",
        candidates.len(),
        folder.display()
    );

    candidates
}

/// Uniform random wallpaper selector
///
/// Owns its random number generator so selection behavior is a property of
/// the component, not of process-global state, and can be seeded in tests.
pub struct WallpaperSelector {
    /// Generator used for the uniform draw
    rng: StdRng,
}

impl WallpaperSelector {
    /// Create a selector seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a selector with a fixed seed (deterministic draws)
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one candidate uniformly at random, or `None` for an empty set
    pub fn pick<'a>(&mut self, candidates: &'a [PathBuf]) -> Option<&'a PathBuf> {
        candidates.choose(&mut self.rng)
    }
}

impl Default for WallpaperSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::collections::HashMap;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn test_supported_extensions_case_insensitive() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "Image.JPG");
        touch(temp_dir.path(), "photo.Png");

        let candidates = collect_candidates(temp_dir.path());
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_non_image_files_excluded() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "notes.txt");
        touch(temp_dir.path(), "archive.zip");
        touch(temp_dir.path(), "no_extension");

        let candidates = collect_candidates(temp_dir.path());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_recursive_enumeration() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "top.jpg");
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        touch(&nested, "deep.bmp");

        let candidates = collect_candidates(temp_dir.path());
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_missing_folder_yields_empty_set() {
        let temp_dir = create_test_dir();
        let missing = temp_dir.path().join("does_not_exist");

        let candidates = collect_candidates(&missing);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_candidate_order_is_stable() {
        let temp_dir = create_test_dir();
        touch(temp_dir.path(), "c.png");
        touch(temp_dir.path(), "a.png");
        touch(temp_dir.path(), "b.png");

        let first = collect_candidates(temp_dir.path());
        let second = collect_candidates(temp_dir.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_empty_returns_none() {
        let mut selector = WallpaperSelector::from_seed(1);
        assert!(selector.pick(&[]).is_none());
    }

    #[test]
    fn test_pick_single_candidate_is_degenerate() {
        let mut selector = WallpaperSelector::from_seed(2);
        let candidates = vec![PathBuf::from("only.jpg")];
        for _ in 0..50 {
            assert_eq!(selector.pick(&candidates), Some(&candidates[0]));
        }
    }

    #[test]
    fn test_pick_is_deterministic_for_same_seed() {
        let candidates: Vec<PathBuf> =
            (0..10).map(|i| PathBuf::from(format!("{i}.jpg"))).collect();

        let mut a = WallpaperSelector::from_seed(42);
        let mut b = WallpaperSelector::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.pick(&candidates), b.pick(&candidates));
        }
    }

    #[test]
    fn test_pick_is_roughly_uniform() {
        let candidates: Vec<PathBuf> = (0..3).map(|i| PathBuf::from(format!("{i}.jpg"))).collect();
        let mut selector = WallpaperSelector::from_seed(7);

        let trials = 3_000;
        let mut counts: HashMap<&PathBuf, u32> = HashMap::new();
        for _ in 0..trials {
            let chosen = selector.pick(&candidates).unwrap();
            *counts.entry(chosen).or_default() += 1;
        }

        // Expected 1000 per candidate; allow a generous 20% band
        for candidate in &candidates {
            let count = counts.get(candidate).copied().unwrap_or(0);
            assert!(
                (800..=1200).contains(&count),
                "candidate {} drawn {} times out of {}",
                candidate.display(),
                count,
                trials
            );
        }
    }
}
