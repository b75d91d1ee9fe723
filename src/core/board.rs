//! Board configuration index
//!
//! NuttX keeps one directory per board configuration:
//! `boards/<arch>/<chip>/<board>/configs/<defconfig>/defconfig`. The index is
//! rebuilt from that layout on every run and never persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::defaults::{BOARDS_DIR_NAME, DEFCONFIG_FILE_NAME};
use crate::error::BoardError;

/// A validated `(board, defconfig)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoardConfig {
    pub board: String,
    pub defconfig: String,
}

impl BoardConfig {
    /// Split a `<board>:<defconfig>` or `<board>/<defconfig>` string
    ///
    /// Only the shape is checked here, not whether the board exists.
    pub fn parse(config: &str) -> Result<Self, BoardError> {
        let mut parts = config.split([':', '/']);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(board), Some(defconfig), None) if !board.is_empty() && !defconfig.is_empty() => {
                Ok(Self {
                    board: board.to_string(),
                    defconfig: defconfig.to_string(),
                })
            }
            _ => Err(BoardError::InvalidFormat {
                config: config.to_string(),
            }),
        }
    }
}

/// Canonical form, always with `:` as separator
impl fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.board, self.defconfig)
    }
}

/// Board name to available defconfigs
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BoardsStore {
    boards: BTreeMap<String, Vec<String>>,
}

impl BoardsStore {
    /// Scan `<nuttx_dir>/boards`
    ///
    /// A missing tree yields an empty index: the sources may simply not be
    /// cloned yet.
    pub fn scan(nuttx_dir: &Path) -> Self {
        let boards_dir = nuttx_dir.join(BOARDS_DIR_NAME);
        if !boards_dir.is_dir() {
            tracing::debug!("No board tree at {}", boards_dir.display());
            return Self::default();
        }

        let entries = WalkDir::new(&boards_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file() && e.file_name() == DEFCONFIG_FILE_NAME)
            .filter_map(|e| {
                let relative = e.path().strip_prefix(&boards_dir).ok()?;
                board_from_path(relative)
            });

        let store = Self::from_entries(entries);
        tracing::debug!(
            "Indexed {} boards from {}",
            store.boards.len(),
            boards_dir.display()
        );
        store
    }

    /// Build an index from known pairs
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = BoardConfig>,
    {
        let mut boards: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in entries {
            boards.entry(entry.board).or_default().push(entry.defconfig);
        }
        for defconfigs in boards.values_mut() {
            defconfigs.sort();
            defconfigs.dedup();
        }
        Self { boards }
    }

    /// All boards with their defconfigs, sorted by name
    pub fn boards(&self) -> &BTreeMap<String, Vec<String>> {
        &self.boards
    }

    /// Defconfigs available for `board`
    pub fn defconfigs(&self, board: &str) -> Option<&[String]> {
        self.boards.get(board).map(Vec::as_slice)
    }

    /// Number of boards
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Parse `config` and check it against the index
    pub fn validate(&self, config: &str) -> Result<BoardConfig, BoardError> {
        let parsed = BoardConfig::parse(config)?;
        let defconfigs = self
            .boards
            .get(&parsed.board)
            .ok_or_else(|| BoardError::UnknownBoard {
                board: parsed.board.clone(),
            })?;
        if defconfigs.contains(&parsed.defconfig) {
            Ok(parsed)
        } else {
            Err(BoardError::UnknownDefconfig {
                board: parsed.board,
                defconfig: parsed.defconfig,
            })
        }
    }

    /// The indexed pair named by `config`, if any
    pub fn search(&self, config: &str) -> Option<BoardConfig> {
        self.validate(config).ok()
    }
}

/// Extract the pair from `.../<board>/configs/<defconfig>/defconfig`
fn board_from_path(relative: &Path) -> Option<BoardConfig> {
    let names: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect();

    match names.as_slice() {
        [.., board, "configs", defconfig, file] if *file == DEFCONFIG_FILE_NAME => {
            Some(BoardConfig {
                board: (*board).to_string(),
                defconfig: (*defconfig).to_string(),
            })
        }
        _ => None,
    }
}
