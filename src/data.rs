use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::DataError;
use crate::models::{ClassRecord, ClassStatus, Student};

fn student(id: &str, name: &str, phone: &str, confirmed: bool) -> Student {
    Student {
        id: id.to_string(),
        display_name: name.to_string(),
        phone_number: phone.to_string(),
        attendance_confirmed: confirmed,
    }
}

pub fn seed_students() -> Vec<Student> {
    vec![
        student("1", "Ana Rodríguez", "+57 300 123 4567", true),
        student("2", "Carlos Martínez", "+57 301 234 5678", false),
        student("3", "Lucía Fernández", "+57 302 345 6789", true),
        student("4", "Diego Herrera", "+57 303 456 7890", true),
        student("5", "Sofia Vargas", "+57 304 567 8901", false),
        student("6", "Miguel Torres", "+57 305 678 9012", true),
        student("7", "Isabella Cruz", "+57 306 789 0123", true),
        student("8", "Andrés Morales", "+57 307 890 1234", false),
        student("9", "Valentina Ruiz", "+57 308 901 2345", true),
        student("10", "Santiago López", "+57 309 012 3456", true),
    ]
}

/// The demo program shipped with the dashboard.
pub fn seed_classes() -> Vec<ClassRecord> {
    let students = seed_students();
    let class = |id: &str,
                 name: &str,
                 (y, m, d): (i32, u32, u32),
                 time_slot: &str,
                 location: &str,
                 instructor: &str,
                 (student_count, max_capacity): (u32, u32),
                 status: ClassStatus,
                 roster: &[Student]| ClassRecord {
        id: id.to_string(),
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        time_slot: time_slot.to_string(),
        location: location.to_string(),
        instructor_name: instructor.to_string(),
        student_count,
        max_capacity,
        status,
        roster: roster.to_vec(),
    };

    vec![
        class(
            "1",
            "Emprendimiento Digital",
            (2024, 1, 15),
            "09:00 - 12:00",
            "Aula 101 - Centro IMDERA",
            "Laura Gómez",
            (25, 30),
            ClassStatus::Scheduled,
            &students[0..5],
        ),
        class(
            "2",
            "Gestión Financiera",
            (2024, 1, 18),
            "14:00 - 17:00",
            "Aula 205 - Centro IMDERA",
            "Óscar Peña",
            (18, 25),
            ClassStatus::InProgress,
            &students[5..8],
        ),
        class(
            "3",
            "Marketing Digital",
            (2024, 1, 12),
            "08:00 - 11:00",
            "Laboratorio de Sistemas",
            "Laura Gómez",
            (22, 22),
            ClassStatus::Completed,
            &students[8..10],
        ),
        class(
            "4",
            "Desarrollo de Productos",
            (2024, 1, 20),
            "15:00 - 18:00",
            "Taller de Innovación",
            "Ricardo Salazar",
            (15, 20),
            ClassStatus::Cancelled,
            &[],
        ),
    ]
}

/// Loads classes from a `.json` file (full records) or a `.csv` file (flat
/// rows without rosters).
pub fn load_classes(path: &Path) -> Result<Vec<ClassRecord>, DataError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let records = match extension.as_deref() {
        Some("json") => {
            let raw = std::fs::read_to_string(path).map_err(|source| DataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_json(&raw)?
        }
        Some("csv") => {
            let file = std::fs::File::open(path).map_err(|source| DataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_csv(file)?
        }
        _ => return Err(DataError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(path = %path.display(), classes = records.len(), "class data loaded");
    Ok(records)
}

pub fn parse_json(raw: &str) -> Result<Vec<ClassRecord>, DataError> {
    let records: Vec<ClassRecord> = serde_json::from_str(raw)?;
    records.iter().try_for_each(validate)?;
    Ok(records)
}

pub fn parse_csv<R: std::io::Read>(reader: R) -> Result<Vec<ClassRecord>, DataError> {
    #[derive(Deserialize)]
    struct CsvRow {
        id: Option<String>,
        name: String,
        date: NaiveDate,
        time_slot: String,
        location: String,
        instructor_name: String,
        student_count: u32,
        max_capacity: u32,
        status: ClassStatus,
    }

    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let id = row
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let record = ClassRecord {
            id,
            name: row.name,
            date: row.date,
            time_slot: row.time_slot,
            location: row.location,
            instructor_name: row.instructor_name,
            student_count: row.student_count,
            max_capacity: row.max_capacity,
            status: row.status,
            roster: Vec::new(),
        };
        validate(&record)?;
        records.push(record);
    }

    Ok(records)
}

fn validate(record: &ClassRecord) -> Result<(), DataError> {
    if record.name.trim().is_empty() {
        return Err(DataError::InvalidRecord {
            id: record.id.clone(),
            reason: "name is empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_matches_the_demo_program() {
        let classes = seed_classes();
        assert_eq!(classes.len(), 4);
        assert_eq!(classes[0].roster.len(), 5);
        assert_eq!(classes[1].roster[0].display_name, "Miguel Torres");
        assert!(classes[3].roster.is_empty());
        assert_eq!(classes[2].date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
    }

    #[test]
    fn json_round_trips_with_spanish_status_names() {
        let raw = r#"[{
            "id": "9",
            "name": "Natación",
            "date": "2024-02-05",
            "time_slot": "07:00 - 08:00",
            "location": "Piscina Olímpica",
            "instructor_name": "Andrés Ruiz",
            "student_count": 12,
            "max_capacity": 15,
            "status": "en-curso",
            "roster": [{"id": "1", "display_name": "Ana", "phone_number": "+57 300"}]
        }]"#;
        let classes = parse_json(raw).unwrap();
        assert_eq!(classes[0].status, ClassStatus::InProgress);
        assert!(!classes[0].roster[0].attendance_confirmed);
    }

    #[test]
    fn csv_rows_get_ids_and_empty_rosters() {
        let raw = "\
id,name,date,time_slot,location,instructor_name,student_count,max_capacity,status
,Fútbol Infantil,2024-01-16,09:00 - 12:00,Cancha 2,Óscar Peña,20,24,programada
c-2,Voleibol,2024-01-17,,Coliseo,Marta Díaz,8,16,scheduled
";
        let classes = parse_csv(raw.as_bytes()).unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes[0].id.starts_with("import-"));
        assert_eq!(classes[1].id, "c-2");
        assert_eq!(classes[1].time_slot, "");
        assert!(classes.iter().all(|c| c.roster.is_empty()));
    }

    #[test]
    fn blank_names_are_rejected() {
        let raw = "\
id,name,date,time_slot,location,instructor_name,student_count,max_capacity,status
x,  ,2024-01-16,09:00,Cancha,Óscar,1,2,scheduled
";
        assert!(matches!(
            parse_csv(raw.as_bytes()),
            Err(DataError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn unknown_extensions_are_refused() {
        assert!(matches!(
            load_classes(Path::new("classes.xlsx")),
            Err(DataError::UnsupportedFormat(_))
        ));
    }
}
