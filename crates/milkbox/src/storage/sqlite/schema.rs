//! SQLite schema definitions and SQL query constants.
//!
//! All SQL statements used by the SQLite repositories, as pure data.
//! Column names (`categoryId`, `startDate`, `endDate`) are part of the
//! persisted on-disk format and must not change.

/// Creates the categories table. Must run before [`CREATE_ITEMS_TABLE`].
pub const CREATE_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
"#;

/// Creates the items table. The foreign key on `categoryId` is advisory:
/// SQLite only enforces it when the `foreign_keys` pragma is on.
pub const CREATE_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    categoryId INTEGER NOT NULL,
    text TEXT NOT NULL,
    date TEXT NOT NULL,
    startDate TEXT,
    endDate TEXT,
    FOREIGN KEY (categoryId) REFERENCES categories(id)
);
"#;

/// Checks whether a table exists in the schema catalog.
pub const TABLE_EXISTS: &str = r#"
SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1
"#;

// Item queries

pub const INSERT_ITEM: &str = r#"
INSERT INTO items (categoryId, text, date, startDate, endDate)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_ALL_ITEMS: &str = r#"
SELECT id, categoryId, text, date, startDate, endDate
FROM items
ORDER BY id DESC
"#;

pub const SELECT_ITEMS_WITH_CATEGORY: &str = r#"
SELECT
    items.id,
    items.categoryId,
    items.text,
    items.date,
    items.startDate,
    items.endDate,
    categories.name AS categoryName
FROM items
LEFT JOIN categories ON items.categoryId = categories.id
ORDER BY categories.name, items.id DESC
"#;

pub const SELECT_ITEM_BY_ID: &str = r#"
SELECT id, categoryId, text, date, startDate, endDate
FROM items
WHERE id = ?1
"#;

pub const UPDATE_ITEM_TEXT: &str = r#"
UPDATE items
SET text = ?2
WHERE id = ?1
"#;

pub const DELETE_ITEM: &str = r#"
DELETE FROM items
WHERE id = ?1
"#;

pub const DELETE_ITEMS_BY_CATEGORY: &str = r#"
DELETE FROM items
WHERE categoryId = ?1
"#;

pub const DROP_ITEMS_TABLE: &str = r#"
DROP TABLE IF EXISTS items
"#;

// Category queries

pub const INSERT_CATEGORY: &str = r#"
INSERT INTO categories (name)
VALUES (?1)
"#;

pub const SELECT_ALL_CATEGORIES: &str = r#"
SELECT id, name
FROM categories
ORDER BY id ASC
"#;

pub const SELECT_CATEGORY_BY_ID: &str = r#"
SELECT id, name
FROM categories
WHERE id = ?1
"#;

pub const UPDATE_CATEGORY: &str = r#"
UPDATE categories
SET name = ?2
WHERE id = ?1
"#;

pub const DELETE_CATEGORY: &str = r#"
DELETE FROM categories
WHERE id = ?1
"#;

pub const DROP_CATEGORIES_TABLE: &str = r#"
DROP TABLE IF EXISTS categories
"#;

// Manager metadata (first-launch reset marker)

pub const CREATE_META_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

pub const SELECT_META: &str = r#"
SELECT value FROM meta WHERE key = ?1
"#;

pub const UPSERT_META: &str = r#"
INSERT OR REPLACE INTO meta (key, value)
VALUES (?1, ?2)
"#;
