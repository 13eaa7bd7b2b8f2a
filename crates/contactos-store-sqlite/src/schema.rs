//! SQL schema for the contact-directory SQLite store.
//!
//! Executed once at connection startup. Natural keys are enforced by UNIQUE
//! constraints; the upserts in [`crate::upsert`] rely on them as conflict
//! targets.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS estado (
    estado_id INTEGER PRIMARY KEY,
    codigo    TEXT NOT NULL UNIQUE COLLATE NOCASE CHECK (length(codigo) = 2),
    nombre    TEXT
);

CREATE TABLE IF NOT EXISTS ciudad (
    ciudad_id INTEGER PRIMARY KEY,
    nombre    TEXT NOT NULL,
    estado_id INTEGER NOT NULL REFERENCES estado(estado_id),
    UNIQUE (nombre, estado_id)
);

CREATE TABLE IF NOT EXISTS empresa (
    empresa_id INTEGER PRIMARY KEY,
    nombre     TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS departamento (
    departamento_id INTEGER PRIMARY KEY,
    nombre          TEXT NOT NULL UNIQUE
);

-- email is stored lower-case; NOCASE guards rows written by other tools.
CREATE TABLE IF NOT EXISTS contacto (
    contacto_id     INTEGER PRIMARY KEY,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE COLLATE NOCASE,
    empresa_id      INTEGER REFERENCES empresa(empresa_id),
    departamento_id INTEGER REFERENCES departamento(departamento_id),
    creado_en       TEXT NOT NULL,   -- RFC 3339 UTC
    actualizado_en  TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE TABLE IF NOT EXISTS direccion (
    direccion_id INTEGER PRIMARY KEY,
    contacto_id  INTEGER NOT NULL UNIQUE REFERENCES contacto(contacto_id) ON DELETE CASCADE,
    ciudad_id    INTEGER REFERENCES ciudad(ciudad_id),
    address      TEXT,
    zip          TEXT
);

CREATE TABLE IF NOT EXISTS telefono (
    telefono_id INTEGER PRIMARY KEY,
    contacto_id INTEGER NOT NULL REFERENCES contacto(contacto_id) ON DELETE CASCADE,
    tipo        TEXT NOT NULL CHECK (tipo IN ('principal', 'alterno')),
    numero      TEXT NOT NULL,
    UNIQUE (contacto_id, tipo)
);

CREATE INDEX IF NOT EXISTS ciudad_estado_idx ON ciudad(estado_id);
CREATE INDEX IF NOT EXISTS contacto_empresa_idx ON contacto(empresa_id);

-- The externally visible contact: every reference resolved, one row per contact.
CREATE VIEW IF NOT EXISTS contacto_vista AS
SELECT
    ct.contacto_id,
    ct.first_name,
    ct.last_name,
    ct.email,
    em.nombre AS empresa,
    dp.nombre AS departamento,
    di.address,
    di.zip,
    ci.nombre AS ciudad,
    es.codigo AS estado,
    t1.numero AS phone1,
    t2.numero AS phone2,
    ct.creado_en,
    ct.actualizado_en
FROM contacto ct
LEFT JOIN empresa      em ON em.empresa_id      = ct.empresa_id
LEFT JOIN departamento dp ON dp.departamento_id = ct.departamento_id
LEFT JOIN direccion    di ON di.contacto_id     = ct.contacto_id
LEFT JOIN ciudad       ci ON ci.ciudad_id       = di.ciudad_id
LEFT JOIN estado       es ON es.estado_id       = ci.estado_id
LEFT JOIN telefono     t1 ON t1.contacto_id     = ct.contacto_id AND t1.tipo = 'principal'
LEFT JOIN telefono     t2 ON t2.contacto_id     = ct.contacto_id AND t2.tipo = 'alterno';

PRAGMA user_version = 1;
";
