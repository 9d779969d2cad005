use std::path::Path;
use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;

use super::sqlite::{open_corpus_database, open_memory_corpus_database, seed_default_diseases};
use super::{CorpusError, DiseaseCorpus};
use crate::models::enums::Severity;
use crate::models::DiseaseRecord;

const DISEASE_COLUMNS: &str = "id, name, scientific_name, description, known_symptoms, causes,
     treatment, prevention, severity, affected_species";

/// A disease record to insert, as accepted by corpus growth tooling and the
/// bundled seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDisease {
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub known_symptoms: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub prevention: String,
    pub severity: Severity,
    #[serde(default)]
    pub affected_species: Vec<String>,
}

/// Insert a disease plus its symptom lookup rows. Returns the new row id.
pub fn insert_disease(conn: &Connection, disease: &NewDisease) -> Result<i64, CorpusError> {
    conn.execute(
        "INSERT INTO diseases
         (name, scientific_name, description, known_symptoms, causes, treatment, prevention, severity, affected_species)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            disease.name,
            disease.scientific_name,
            disease.description,
            serde_json::to_string(&disease.known_symptoms).expect("string list serializes"),
            serde_json::to_string(&disease.causes).expect("string list serializes"),
            disease.treatment,
            disease.prevention,
            disease.severity.as_str(),
            serde_json::to_string(&disease.affected_species).expect("string list serializes"),
        ],
    )?;
    let disease_id = conn.last_insert_rowid();

    for symptom in &disease.known_symptoms {
        conn.execute(
            "INSERT INTO disease_symptoms (disease_id, symptom) VALUES (?1, ?2)",
            params![disease_id, symptom],
        )?;
    }

    Ok(disease_id)
}

/// SQLite-backed implementation of the disease corpus collaborator.
pub struct SqliteCorpus {
    conn: Connection,
}

impl SqliteCorpus {
    /// Open (creating and seeding if needed) a corpus at the given path.
    pub fn open(path: &Path) -> Result<Self, CorpusError> {
        let conn = open_corpus_database(path)?;
        seed_default_diseases(&conn)?;
        Ok(Self { conn })
    }

    /// Seeded in-memory corpus (for testing).
    pub fn in_memory() -> Result<Self, CorpusError> {
        let conn = open_memory_corpus_database()?;
        seed_default_diseases(&conn)?;
        Ok(Self { conn })
    }

    /// Unseeded in-memory corpus, for tests that build their own reference set.
    pub fn in_memory_empty() -> Result<Self, CorpusError> {
        let conn = open_memory_corpus_database()?;
        Ok(Self { conn })
    }

    pub fn insert(&self, disease: &NewDisease) -> Result<i64, CorpusError> {
        insert_disease(&self.conn, disease)
    }
}

struct DiseaseRow {
    id: i64,
    name: String,
    scientific_name: String,
    description: String,
    known_symptoms: String,
    causes: String,
    treatment: String,
    prevention: String,
    severity: String,
    affected_species: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DiseaseRow> {
    Ok(DiseaseRow {
        id: row.get(0)?,
        name: row.get(1)?,
        scientific_name: row.get(2)?,
        description: row.get(3)?,
        known_symptoms: row.get(4)?,
        causes: row.get(5)?,
        treatment: row.get(6)?,
        prevention: row.get(7)?,
        severity: row.get(8)?,
        affected_species: row.get(9)?,
    })
}

fn parse_list(name: &str, field: &str, json: &str) -> Result<Vec<String>, CorpusError> {
    serde_json::from_str(json).map_err(|e| CorpusError::MalformedRecord {
        name: name.to_string(),
        reason: format!("{field}: {e}"),
    })
}

fn row_to_record(row: DiseaseRow) -> Result<DiseaseRecord, CorpusError> {
    let known_symptoms = parse_list(&row.name, "known_symptoms", &row.known_symptoms)?;
    let causes = parse_list(&row.name, "causes", &row.causes)?;
    let affected_species = parse_list(&row.name, "affected_species", &row.affected_species)?;
    Ok(DiseaseRecord {
        id: row.id,
        name: row.name,
        scientific_name: row.scientific_name,
        description: row.description,
        known_symptoms,
        causes,
        treatment: row.treatment,
        prevention: row.prevention,
        severity: Severity::from_str(&row.severity)?,
        affected_species,
    })
}

impl DiseaseCorpus for SqliteCorpus {
    fn search_by_symptoms(
        &self,
        keys: &[String],
    ) -> Result<Vec<(DiseaseRecord, usize)>, CorpusError> {
        let mut stmt = self.conn.prepare(
            "SELECT d.id, d.name, d.scientific_name, d.description, d.known_symptoms, d.causes,
                    d.treatment, d.prevention, d.severity, d.affected_species
             FROM diseases d
             JOIN disease_symptoms s ON d.id = s.disease_id
             WHERE s.symptom = ?1",
        )?;

        let mut matches: Vec<(DiseaseRecord, usize)> = Vec::new();
        for key in keys {
            let rows = stmt.query_map(params![key], read_row)?;
            for row in rows {
                let record = row_to_record(row?)?;
                match matches.iter_mut().find(|(d, _)| d.id == record.id) {
                    Some((_, count)) => *count += 1,
                    None => matches.push((record, 1)),
                }
            }
        }

        matches.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(matches)
    }

    fn search_by_name(&self, name: &str) -> Result<Option<DiseaseRecord>, CorpusError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DISEASE_COLUMNS} FROM diseases WHERE LOWER(name) = LOWER(?1)"
        ))?;
        let row = stmt.query_row(params![name], read_row).optional()?;
        row.map(row_to_record).transpose()
    }

    fn search_by_keyword(&self, keyword: &str) -> Result<Vec<DiseaseRecord>, CorpusError> {
        let term = format!("%{}%", keyword);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DISEASE_COLUMNS} FROM diseases
             WHERE LOWER(name) LIKE LOWER(?1) OR LOWER(description) LIKE LOWER(?1)"
        ))?;
        let rows = stmt.query_map(params![term], read_row)?;
        rows.map(|row| row_to_record(row?)).collect()
    }

    fn all_diseases(&self) -> Result<Vec<DiseaseRecord>, CorpusError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {DISEASE_COLUMNS} FROM diseases ORDER BY id"))?;
        let rows = stmt.query_map([], read_row)?;
        rows.map(|row| row_to_record(row?)).collect()
    }
}
