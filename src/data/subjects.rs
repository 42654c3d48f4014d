use super::error::DataError;
use super::model::Subject;
use super::table::Table;

/// All subjects of a dataset, in table order.
#[derive(Debug, Clone, Default)]
pub struct SubjectRegistry {
    subjects: Vec<Subject>,
}

impl SubjectRegistry {
    /// Read subject descriptors from the subject table.
    pub fn from_table(table: &Table) -> Result<Self, DataError> {
        let id = table.column_index(&["Subject ID"])?;
        let age = table.column_index(&["Age"])?;
        let gender = table.column_index(&["Gender"])?;
        let smoke = table.column_index(&["Smoke"])?;
        let alcohol = table.column_index(&["Alcoholic"])?;
        let medication = table.column_index(&["Medication"])?;
        let language = table.column_index(&["Mother Language"])?;
        let bmi = table.column_index(&["BMI"])?;
        let comments = table.column_index(&["comments", "Comments"])?;

        let subjects = (0..table.len())
            .map(|row| {
                Subject::new(
                    table.cell(row, id),
                    table.parse_cell(row, age)?,
                    table.cell(row, gender),
                    table.cell(row, smoke) == "Yes",
                    table.cell(row, alcohol),
                    table.cell(row, medication) == "Yes",
                    table.cell(row, language),
                    table.parse_cell(row, bmi)?,
                    table.cell(row, comments),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Loaded {} subjects from {}", subjects.len(), table.name());
        Ok(SubjectRegistry { subjects })
    }

    /// Find a subject by id (`S01`, `s01`) or by bare number (`1`).
    pub fn find(&self, query: &str) -> Result<&Subject, DataError> {
        self.index_of(query).map(|i| &self.subjects[i])
    }

    /// Position of the subject matching `query`, as accepted by [`find`](Self::find).
    pub fn index_of(&self, query: &str) -> Result<usize, DataError> {
        let query = query.trim();
        let number = query.parse::<u32>().ok();
        self.subjects
            .iter()
            .position(|s| s.id().eq_ignore_ascii_case(query) || number == Some(s.numeric_id()))
            .ok_or_else(|| DataError::SubjectNotFound(query.to_string()))
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECTS: &str = "\
Subject ID,Age ,Gender,Smoke,Alcoholic,Medication,Mother Language,BMI,comments
S01,24,M,Yes,Occasionally,No,Arabic,23.1,
S02,31,F,No,No,Yes,English,19.8,left-handed
S10,27,F,No,No,No,Arabic,21.0,nan
";

    fn registry() -> SubjectRegistry {
        let table = Table::from_reader("Subjects.csv", SUBJECTS.as_bytes()).unwrap();
        SubjectRegistry::from_table(&table).unwrap()
    }

    #[test]
    fn parses_rows() {
        let reg = registry();
        assert_eq!(reg.len(), 3);

        let s1 = &reg.subjects()[0];
        assert_eq!(s1.id(), "S01");
        assert_eq!(s1.age, 24);
        assert!(s1.smoke);
        assert!(!s1.medication);
        assert_eq!(s1.alcohol, "Occasionally");
        assert_eq!(s1.comments, "");

        let s2 = &reg.subjects()[1];
        assert!(s2.medication);
        assert_eq!(s2.language, "English");
        assert_eq!(s2.comments, "left-handed");
        assert!((s2.bmi - 19.8).abs() < 1e-12);

        assert_eq!(reg.subjects()[2].comments, "");
    }

    #[test]
    fn find_accepts_several_id_forms() {
        let reg = registry();
        assert_eq!(reg.find("S02").unwrap().numeric_id(), 2);
        assert_eq!(reg.find("s10").unwrap().numeric_id(), 10);
        assert_eq!(reg.find(" 1 ").unwrap().id(), "S01");
        assert_eq!(reg.index_of("S10").unwrap(), 2);
        assert!(matches!(
            reg.find("S03"),
            Err(DataError::SubjectNotFound(q)) if q == "S03"
        ));
    }

    #[test]
    fn bad_age_is_a_parse_error() {
        let text = SUBJECTS.replace("S02,31", "S02,thirty");
        let table = Table::from_reader("Subjects.csv", text.as_bytes()).unwrap();
        assert!(matches!(
            SubjectRegistry::from_table(&table),
            Err(DataError::Parse { row: 1, .. })
        ));
    }
}
