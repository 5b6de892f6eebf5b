//! Schema Module - Per-domain field declarations
//!
//! Pure data: which fields a form shows, how they are typed and how
//! categorical choices are encoded. Field order is the model's feature order.

pub mod types;
mod diabetes;
mod heart;
mod parkinsons;

pub use types::{
    CategoricalMapping, CategoricalOption, Constraints, DomainSchema, FieldKind, FieldSpec,
    OutcomeMessages, SchemaError,
};

use crate::logic::domain::DomainId;

/// The three built-in schemas, checked once at construction
#[derive(Debug, Clone)]
pub struct SchemaSet {
    diabetes: DomainSchema,
    heart_disease: DomainSchema,
    parkinsons: DomainSchema,
}

impl SchemaSet {
    pub fn builtin() -> Result<Self, SchemaError> {
        Ok(Self {
            diabetes: diabetes::schema()?,
            heart_disease: heart::schema()?,
            parkinsons: parkinsons::schema()?,
        })
    }

    pub fn get(&self, domain: DomainId) -> &DomainSchema {
        match domain {
            DomainId::Diabetes => &self.diabetes,
            DomainId::HeartDisease => &self.heart_disease,
            DomainId::Parkinsons => &self.parkinsons,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainSchema> {
        DomainId::ALL.into_iter().map(move |d| self.get(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout;

    #[test]
    fn test_builtin_schemas_follow_layouts() {
        let schemas = SchemaSet::builtin().unwrap();
        for schema in schemas.iter() {
            let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, layout(schema.domain));
            assert_eq!(schema.positive_class, 1);
        }
    }

    #[test]
    fn test_heart_categoricals() {
        let schemas = SchemaSet::builtin().unwrap();
        let heart = schemas.get(DomainId::HeartDisease);

        let cp = heart.field("cp").unwrap();
        assert_eq!(cp.kind, FieldKind::Categorical);
        assert_eq!(cp.mapping.as_ref().unwrap().code_for("Asymptomatic"), Some(3));

        let ca = heart.field("ca").unwrap();
        assert_eq!(ca.kind, FieldKind::Integer);
    }

    #[test]
    fn test_labels_match_form_text() {
        let schemas = SchemaSet::builtin().unwrap();
        let diabetes = schemas.get(DomainId::Diabetes);
        assert_eq!(diabetes.field("Glucose").unwrap().label, "Glucose Level");
        assert_eq!(diabetes.message_for(true), "The person is diabetic");

        let parkinsons = schemas.get(DomainId::Parkinsons);
        assert_eq!(parkinsons.field("Jitter_percent").unwrap().label, "MDVP:Jitter(%)");
        assert_eq!(parkinsons.len(), 22);
    }

    #[test]
    fn test_parkinsons_measurements_have_no_step() {
        let schemas = SchemaSet::builtin().unwrap();
        let parkinsons = schemas.get(DomainId::Parkinsons);
        assert!(parkinsons.fields().iter().all(|f| f.constraints.step.is_none()));

        // UCI row values must stay acceptable as entered
        let jitter_abs = parkinsons.field("Jitter_Abs").unwrap();
        assert!(jitter_abs.constraints.contains(0.000007));
        assert!(parkinsons.field("spread1").unwrap().constraints.contains(-4.813031));
    }
}
