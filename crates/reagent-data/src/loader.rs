//! Resolution pipeline: reads data files, resolves cross-references, builds
//! the catalog.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! (de)serialization helpers shared with the snapshot readers and writers.

use reagent_core::sanitize::sanitize_price;
use reagent_core::{Catalog, CatalogBuilder, CatalogError, Item, RecipeEntry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::schema::{ItemData, RecipeData};

/// Base name of the item list file in a data directory.
pub const ITEMS_FILE: &str = "items";
/// Base name of the recipe list file in a data directory.
pub const RECIPES_FILE: &str = "recipes";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A serialization error occurred.
    #[error("could not write {file}: {detail}")]
    Serialize { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The resolved content was rejected by the catalog builder.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// (De)serialization
// ===========================================================================

fn parse_error(path: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
                .clone();
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

/// Serialize `value` and write it to `path` in the format its extension names.
pub fn serialize_file<T: Serialize>(path: &Path, value: &T) -> Result<(), DataLoadError> {
    let format = detect_format(path)?;
    let write_error = |e: &dyn std::fmt::Display| DataLoadError::Serialize {
        file: path.to_path_buf(),
        detail: e.to_string(),
    };

    let content = match format {
        Format::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
            .map_err(|e| write_error(&e))?,
        Format::Json => serde_json::to_string_pretty(value).map_err(|e| write_error(&e))?,
        Format::Toml => toml::to_string_pretty(value).map_err(|e| write_error(&e))?,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

// ===========================================================================
// Name resolution helpers
// ===========================================================================

/// Check that `name` was declared, returning an `UnresolvedRef` error if not.
pub fn check_known(
    names: &HashSet<String>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<(), DataLoadError> {
    if names.contains(name) {
        Ok(())
    } else {
        Err(DataLoadError::UnresolvedRef {
            file: file.to_path_buf(),
            name: name.to_string(),
            expected_kind,
        })
    }
}

/// Record `name` as declared, returning a `DuplicateName` error if it already
/// was.
pub fn insert_unique(
    names: &mut HashSet<String>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if names.insert(name.to_string()) {
        Ok(())
    } else {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    }
}

// ===========================================================================
// Catalog loading
// ===========================================================================

fn item_from_data(data: ItemData) -> Item {
    Item {
        key: data.key,
        name: data.name,
        is_craftable: data.craftable,
        is_marketable: data.marketable,
        market_id: data.market_id,
        vendor_price: data.vendor_price.map(sanitize_price),
        default_market_price: data.market_price.map(sanitize_price),
        acquisition_method: data.acquisition,
        acquisition_note: data.note,
    }
}

/// Load the item and recipe catalog from `dir`.
///
/// `items.{ron,toml,json}` is required; `recipes.*` is optional. Recipe
/// outputs must name a known item. Ingredients may name unknown items; the
/// resolver skips them.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataLoadError> {
    let items_path = require_data_file(dir, ITEMS_FILE)?;
    let items: Vec<ItemData> = deserialize_list(&items_path, "items")?;

    let mut builder = CatalogBuilder::new();
    let mut item_names: HashSet<String> = HashSet::new();
    for data in items {
        insert_unique(&mut item_names, &data.key, &items_path)?;
        builder.register_item(item_from_data(data))?;
    }
    tracing::debug!(count = item_names.len(), file = %items_path.display(), "items loaded");

    if let Some(recipes_path) = find_data_file(dir, RECIPES_FILE)? {
        let recipes: Vec<RecipeData> = deserialize_list(&recipes_path, "recipes")?;
        let count = recipes.len();
        for recipe in recipes {
            check_known(&item_names, &recipe.output, &recipes_path, "item")?;
            let ingredients = recipe
                .ingredients
                .iter()
                .map(|i| RecipeEntry::new(i.item(), i.quantity()))
                .collect();
            builder.register_recipe(&recipe.output, recipe.method.as_deref(), ingredients);
        }
        tracing::debug!(count, file = %recipes_path.display(), "recipes loaded");
    }

    Ok(builder.build()?)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use reagent_core::{AcquisitionMethod, Silver};
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    pub(crate) fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "reagent_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    pub(crate) fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const ITEMS_RON: &str = r#"[
        (key: "copper_ore", name: "Copper Ore", marketable: true, market_id: Some(4057),
         market_price: Some(4.0), acquisition: market),
        (key: "copper_bar", name: "Copper Bar", craftable: true, acquisition: craft),
    ]"#;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("items.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("items.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("items.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        for name in ["items.yaml", "items"] {
            let result = detect_format(Path::new(name));
            assert!(matches!(result, Err(DataLoadError::UnsupportedFormat { .. })));
        }
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found_and_missing() {
        let dir = make_test_dir("find");
        assert_eq!(find_data_file(&dir, "items").unwrap(), None);

        fs::write(dir.join("items.json"), "[]").unwrap();
        assert_eq!(find_data_file(&dir, "items").unwrap(), Some(dir.join("items.json")));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("items.ron"), "[]").unwrap();
        fs::write(dir.join("items.json"), "[]").unwrap();

        let result = find_data_file(&dir, "items");
        assert!(matches!(result, Err(DataLoadError::ConflictingFormats { .. })));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");

        let result = require_data_file(&dir, "items");
        match result {
            Err(DataLoadError::MissingRequired { file, .. }) => assert_eq!(file, "items"),
            other => panic!("expected MissingRequired, got: {other:?}"),
        }

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_list / serialize_file
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_toml() {
        let dir = make_test_dir("list_toml");
        let path = dir.join("items.toml");
        fs::write(
            &path,
            r#"
[[items]]
key = "fern_root"
name = "Fern Root"
acquisition = "farm"

[[items]]
key = "eternal_herb"
name = "Eternal Herb"
acquisition = "market"
market_price = 2400
"#,
        )
        .unwrap();

        let items: Vec<ItemData> = deserialize_list(&path, "items").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].market_price, Some(2400.0));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("items.toml");
        fs::write(&path, r#"foo = "bar""#).unwrap();

        let result: Result<Vec<ItemData>, _> = deserialize_list(&path, "items");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_parse_error() {
        let dir = make_test_dir("deser_parse_err");
        let path = dir.join("bad.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<Vec<ItemData>, _> = deserialize_file(&path);
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn serialize_file_creates_parent_dirs() {
        let dir = make_test_dir("ser_parent");
        let path = dir.join("nested").join("value.json");
        serialize_file(&path, &vec![1, 2, 3]).unwrap();
        let back: Vec<i32> = deserialize_file(&path).unwrap();
        assert_eq!(back, [1, 2, 3]);

        cleanup(&dir);
    }

    #[test]
    fn serialize_file_rejects_unknown_extension() {
        let dir = make_test_dir("ser_unsupported");
        let result = serialize_file(&dir.join("value.yaml"), &1);
        assert!(matches!(result, Err(DataLoadError::UnsupportedFormat { .. })));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // check_known / insert_unique
    // -----------------------------------------------------------------------

    #[test]
    fn check_known_missing() {
        let names: HashSet<String> = ["fire_horn".to_string()].into_iter().collect();

        assert!(check_known(&names, "fire_horn", Path::new("recipes.ron"), "item").is_ok());
        let result = check_known(&names, "moon_opal", Path::new("recipes.ron"), "item");
        assert!(matches!(
            result,
            Err(DataLoadError::UnresolvedRef { ref name, expected_kind: "item", .. }) if name == "moon_opal"
        ));
    }

    #[test]
    fn insert_unique_rejects_second_insert() {
        let mut names = HashSet::new();

        insert_unique(&mut names, "moon_opal", Path::new("items.ron")).unwrap();
        let result = insert_unique(&mut names, "moon_opal", Path::new("items.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "moon_opal"
        ));
        assert_eq!(names.len(), 1);
    }

    // -----------------------------------------------------------------------
    // load_catalog
    // -----------------------------------------------------------------------

    #[test]
    fn load_catalog_ron() {
        let dir = make_test_dir("catalog_ron");
        fs::write(dir.join("items.ron"), ITEMS_RON).unwrap();
        fs::write(
            dir.join("recipes.ron"),
            r#"[(output: "copper_bar", ingredients: [("copper_ore", 5)])]"#,
        )
        .unwrap();

        let cat = load_catalog(&dir).unwrap();
        assert_eq!(cat.item_count(), 2);
        assert_eq!(cat.recipe_count(), 1);

        let ore = cat.item_by_key("copper_ore").unwrap();
        assert!(ore.is_marketable);
        assert_eq!(ore.market_id, Some(4057));
        assert_eq!(ore.default_market_price, Some(Silver::from_num(4u32)));
        assert_eq!(ore.acquisition_method, AcquisitionMethod::Market);

        let bar = cat.item_id("copper_bar").unwrap();
        assert_eq!(cat.recipes_for(bar)[0].ingredients[0].quantity_per_unit, 5);

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_without_recipes() {
        let dir = make_test_dir("catalog_no_recipes");
        fs::write(dir.join("items.ron"), ITEMS_RON).unwrap();

        let cat = load_catalog(&dir).unwrap();
        assert_eq!(cat.item_count(), 2);
        assert_eq!(cat.recipe_count(), 0);

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_requires_items() {
        let dir = make_test_dir("catalog_missing_items");

        let result = load_catalog(&dir);
        assert!(matches!(result, Err(DataLoadError::MissingRequired { .. })));

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_rejects_duplicate_item() {
        let dir = make_test_dir("catalog_dup");
        fs::write(
            dir.join("items.json"),
            r#"[
                {"key": "a", "name": "A", "acquisition": "farm"},
                {"key": "a", "name": "A again", "acquisition": "farm"}
            ]"#,
        )
        .unwrap();

        let result = load_catalog(&dir);
        assert!(matches!(result, Err(DataLoadError::DuplicateName { ref name, .. }) if name == "a"));

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_rejects_unknown_output() {
        let dir = make_test_dir("catalog_bad_output");
        fs::write(dir.join("items.ron"), ITEMS_RON).unwrap();
        fs::write(
            dir.join("recipes.ron"),
            r#"[(output: "bronze_bar", ingredients: [("copper_ore", 1)])]"#,
        )
        .unwrap();

        let result = load_catalog(&dir);
        assert!(matches!(
            result,
            Err(DataLoadError::UnresolvedRef { ref name, .. }) if name == "bronze_bar"
        ));

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_keeps_unknown_ingredient() {
        let dir = make_test_dir("catalog_unknown_ingredient");
        fs::write(dir.join("items.ron"), ITEMS_RON).unwrap();
        fs::write(
            dir.join("recipes.json"),
            r#"[{"output": "copper_bar", "ingredients": [["charcoal", 1], ["copper_ore", 5]]}]"#,
        )
        .unwrap();

        let cat = load_catalog(&dir).unwrap();
        let bar = cat.item_id("copper_bar").unwrap();
        assert_eq!(cat.recipes_for(bar)[0].ingredients.len(), 2);

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "items".to_string(),
            dir: PathBuf::from("/data"),
        };
        assert!(format!("{e}").contains("items"));
        assert!(format!("{e}").contains("/data"));

        let e = DataLoadError::Serialize {
            file: PathBuf::from("prices.toml"),
            detail: "unsupported None".to_string(),
        };
        assert!(format!("{e}").contains("prices.toml"));

        let e = DataLoadError::UnresolvedRef {
            file: PathBuf::from("recipes.ron"),
            name: "moon_opal".to_string(),
            expected_kind: "item",
        };
        let msg = format!("{e}");
        assert!(msg.contains("moon_opal"));
        assert!(msg.contains("item"));

        let e: DataLoadError = CatalogError::DuplicateItem("a".to_string()).into();
        assert!(format!("{e}").contains("duplicate item key"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
