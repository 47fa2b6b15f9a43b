//! Classifies inflected forms by their tags.

use crate::record::Form;
use sanasto_core::{Case, Person};
use std::collections::{BTreeMap, HashSet};

// checked in order, the first pair fully contained in a form's tags decides its person
const PERSON_TAGS: [(&str, &str, Person); 6] = [
    ("first-person", "singular", Person::FirstSingular),
    ("second-person", "singular", Person::SecondSingular),
    ("third-person", "singular", Person::ThirdSingular),
    ("first-person", "plural", Person::FirstPlural),
    ("second-person", "plural", Person::SecondPlural),
    ("third-person", "plural", Person::ThirdPlural),
];

/// The singular and plural forms of a single case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberForms {
    pub singular: Option<String>,
    pub plural: Option<String>,
}

/// Collects the present indicative affirmative forms of a verb.
///
/// The first form found for each person is kept.
pub fn conjugations(forms: &[Form]) -> BTreeMap<Person, String> {
    let mut conjugations = BTreeMap::new();
    for (form, tags) in tagged_forms(forms) {
        let present_indicative = tags.contains("present") && tags.contains("indicative");
        if !present_indicative || tags.contains("negative") {
            continue;
        }
        let person = PERSON_TAGS
            .iter()
            .find(|(a, b, _)| tags.contains(a) && tags.contains(b))
            .map(|(_, _, person)| *person);
        if let Some(person) = person {
            conjugations
                .entry(person)
                .or_insert_with(|| form.to_string());
        }
    }
    conjugations
}

/// Collects the case forms of a noun.
///
/// A form belongs to the first case in canonical order among its tags and is plural if tagged so.
/// The first form found for each case and number is kept.
pub fn declensions(forms: &[Form]) -> BTreeMap<Case, NumberForms> {
    let mut declensions = BTreeMap::<Case, NumberForms>::new();
    for (form, tags) in tagged_forms(forms) {
        let Some(case) = Case::ALL.into_iter().find(|c| tags.contains(c.name())) else {
            continue;
        };
        let numbers = declensions.entry(case).or_default();
        let slot = if tags.contains("plural") {
            &mut numbers.plural
        } else {
            &mut numbers.singular
        };
        if slot.is_none() {
            *slot = Some(form.to_string());
        }
    }
    declensions
}

// pairs each form that has text with the set of its tags
fn tagged_forms(forms: &[Form]) -> impl Iterator<Item = (&str, HashSet<&str>)> {
    forms.iter().filter_map(|f| {
        let form = f.form.as_deref().filter(|f| !f.is_empty())?;
        let tags = f.tags.iter().map(String::as_str).collect();
        Some((form, tags))
    })
}
