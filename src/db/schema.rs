//! Database schema and migrations.
//!
//! Migrations are applied in order; the `schema_version` table records which
//! ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: shares
    r#"
CREATE TABLE smb_shares (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    path          TEXT NOT NULL,           -- UNC-like root, e.g. //host/share
    username      TEXT,
    password      TEXT,
    auto_connect  INTEGER NOT NULL DEFAULT 0,
    is_connected  INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL
);

CREATE INDEX idx_smb_shares_name ON smb_shares(name);
"#,
    // v2: virtual tree entries
    r#"
CREATE TABLE file_items (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    share_id     INTEGER NOT NULL REFERENCES smb_shares(id) ON DELETE CASCADE,
    name         TEXT NOT NULL,
    path         TEXT NOT NULL,            -- canonical: /a/b
    parent_path  TEXT NOT NULL,            -- '/' for root children
    type         TEXT NOT NULL CHECK (type IN ('file', 'folder')),
    size         INTEGER,
    mime_type    TEXT,
    stored_name  TEXT,                     -- content blob key, files only
    modified_at  TEXT,
    created_at   TEXT NOT NULL,
    UNIQUE(share_id, path)
);

CREATE INDEX idx_file_items_parent ON file_items(share_id, parent_path);
"#,
];
