//! Static GLP-1 medication reference data.
//!
//! The catalogue is immutable and loaded with the process. Dosage sequences
//! are ordered ascending by potency; that order drives "next dosage" lookups
//! during titration and never changes at runtime.

use serde::Serialize;

/// A GLP-1 analogue medication record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Medication {
    pub id: &'static str,
    pub commercial_name: &'static str,
    pub active_ingredient: &'static str,
    /// Available dosages, ascending potency.
    pub dosages: &'static [&'static str],
    pub manufacturer: &'static str,
    pub administration: &'static str,
    pub frequency: &'static str,
    pub description: &'static str,
}

impl Medication {
    /// Position of `dosage` within this medication's sequence.
    pub fn dosage_position(&self, dosage: &str) -> Option<usize> {
        self.dosages.iter().position(|d| *d == dosage)
    }

    /// The dosage immediately after `current` in the sequence.
    ///
    /// Returns `None` when `current` is already the last dosage or is not a
    /// member of the sequence at all; both mean no escalation is available.
    pub fn next_dosage(&self, current: &str) -> Option<&'static str> {
        let position = self.dosage_position(current)?;
        self.dosages.get(position + 1).copied()
    }
}

const MEDICATIONS: &[Medication] = &[
    Medication {
        id: "mounjaro",
        commercial_name: "Mounjaro",
        active_ingredient: "Tirzepatide",
        dosages: &["2.5mg", "5mg", "7.5mg", "10mg", "12.5mg", "15mg"],
        manufacturer: "Eli Lilly",
        administration: "Subcutaneous",
        frequency: "Weekly",
        description: "Dual GIP/GLP-1 receptor agonist",
    },
    Medication {
        id: "ozempic",
        commercial_name: "Ozempic",
        active_ingredient: "Semaglutide",
        dosages: &["0.25mg", "0.5mg", "1mg", "2mg"],
        manufacturer: "Novo Nordisk",
        administration: "Subcutaneous",
        frequency: "Weekly",
        description: "GLP-1 receptor agonist",
    },
    Medication {
        id: "wegovy",
        commercial_name: "Wegovy",
        active_ingredient: "Semaglutide",
        dosages: &["0.25mg", "0.5mg", "1mg", "1.7mg", "2.4mg"],
        manufacturer: "Novo Nordisk",
        administration: "Subcutaneous",
        frequency: "Weekly",
        description: "GLP-1 receptor agonist for weight control",
    },
    Medication {
        id: "saxenda",
        commercial_name: "Saxenda",
        active_ingredient: "Liraglutide",
        dosages: &["0.6mg", "1.2mg", "1.8mg", "2.4mg", "3mg"],
        manufacturer: "Novo Nordisk",
        administration: "Subcutaneous",
        frequency: "Daily",
        description: "GLP-1 receptor agonist",
    },
    Medication {
        id: "victoza",
        commercial_name: "Victoza",
        active_ingredient: "Liraglutide",
        dosages: &["0.6mg", "1.2mg", "1.8mg"],
        manufacturer: "Novo Nordisk",
        administration: "Subcutaneous",
        frequency: "Daily",
        description: "GLP-1 receptor agonist",
    },
    Medication {
        id: "rybelsus",
        commercial_name: "Rybelsus",
        active_ingredient: "Semaglutide",
        dosages: &["3mg", "7mg", "14mg"],
        manufacturer: "Novo Nordisk",
        administration: "Oral",
        frequency: "Daily",
        description: "Oral GLP-1 receptor agonist",
    },
];

/// The full medication catalogue.
pub fn medications() -> &'static [Medication] {
    MEDICATIONS
}

/// Look up a medication by its exact commercial name.
pub fn find_by_commercial_name(name: &str) -> Option<&'static Medication> {
    MEDICATIONS.iter().find(|m| m.commercial_name == name)
}

/// Look up a medication by its catalogue id.
pub fn find_by_id(id: &str) -> Option<&'static Medication> {
    MEDICATIONS.iter().find(|m| m.id == id)
}
