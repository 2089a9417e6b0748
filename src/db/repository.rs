use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Serialize;

use super::DatabaseError;

/// One persisted consultation outcome. Never mutated after insert.
#[derive(Debug, Clone, Serialize)]
pub struct PatientRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub bp: f64,
    pub temp: f64,
    pub symptom: String,
    pub symptom_description: Option<String>,
    pub disease: String,
    pub suggestion: String,
    pub tablet: String,
    pub created_at: Option<String>,
}

/// Insert input: the store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub bp: f64,
    pub temp: f64,
    pub symptom: String,
    pub symptom_description: Option<String>,
    pub disease: String,
    pub suggestion: String,
    pub tablet: String,
}

/// Append one record. Returns the assigned id.
pub fn insert_record(conn: &Connection, record: &NewRecord) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO records (name, age, gender, bp, temp, symptom, symptom_description,
         disease, suggestion, tablet, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.name,
            record.age,
            record.gender,
            record.bp,
            record.temp,
            record.symptom,
            record.symptom_description,
            record.disease,
            record.suggestion,
            record.tablet,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All records, oldest first.
pub fn get_all_records(conn: &Connection) -> Result<Vec<PatientRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, gender, bp, temp, symptom, symptom_description,
         disease, suggestion, tablet, created_at
         FROM records ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PatientRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            gender: row.get(3)?,
            bp: row.get(4)?,
            temp: row.get(5)?,
            symptom: row.get(6)?,
            symptom_description: row.get(7)?,
            disease: row.get(8)?,
            suggestion: row.get(9)?,
            tablet: row.get(10)?,
            created_at: row.get(11)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Delete one record by id. Absent ids are a no-op, reported as false.
pub fn delete_record(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
    Ok(affected > 0)
}

/// Delete every record. Returns how many were removed.
pub fn delete_all_records(conn: &Connection) -> Result<usize, DatabaseError> {
    let affected = conn.execute("DELETE FROM records", [])?;
    Ok(affected)
}
