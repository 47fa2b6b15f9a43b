// Mirrors sql/lexicon.sql and sql/flat.sql.

diesel::table! {
    antonyms (id) {
        id -> Integer,
        sense_id -> Integer,
        term -> Text,
        tags_json -> Nullable<Text>,
        extra_json -> Nullable<Text>,
    }
}

diesel::table! {
    derived_terms (id) {
        id -> Integer,
        entry_id -> Integer,
        term -> Text,
        source_sense_identifier -> Nullable<Text>,
        extra_json -> Nullable<Text>,
    }
}

diesel::table! {
    entries (id) {
        id -> Integer,
        word -> Text,
        pos -> Text,
        primary_translation -> Nullable<Text>,
        etymology -> Nullable<Text>,
    }
}

diesel::table! {
    forms (id) {
        id -> Integer,
        entry_id -> Integer,
        form -> Text,
        tags_json -> Nullable<Text>,
        source -> Nullable<Text>,
    }
}

diesel::table! {
    noun_declensions (word_id, case_name) {
        word_id -> Integer,
        case_name -> Text,
        singular -> Nullable<Text>,
        plural -> Nullable<Text>,
    }
}

diesel::table! {
    related_terms (id) {
        id -> Integer,
        entry_id -> Integer,
        term -> Text,
        source_sense_identifier -> Nullable<Text>,
        tags_json -> Nullable<Text>,
        extra_json -> Nullable<Text>,
    }
}

diesel::table! {
    senses (id) {
        id -> Integer,
        entry_id -> Integer,
        sense_identifier -> Nullable<Text>,
        gloss -> Nullable<Text>,
        glosses_json -> Nullable<Text>,
        raw_glosses_json -> Nullable<Text>,
        tags_json -> Nullable<Text>,
        topics_json -> Nullable<Text>,
        links_json -> Nullable<Text>,
        categories_json -> Nullable<Text>,
        examples_json -> Nullable<Text>,
        form_of_json -> Nullable<Text>,
    }
}

diesel::table! {
    synonyms (id) {
        id -> Integer,
        sense_id -> Integer,
        term -> Text,
        tags_json -> Nullable<Text>,
        extra_json -> Nullable<Text>,
    }
}

diesel::table! {
    verb_conjugations (word_id, person) {
        word_id -> Integer,
        person -> Text,
        form -> Text,
    }
}

diesel::table! {
    words (id) {
        id -> Integer,
        word -> Text,
        pos -> Text,
        definition -> Nullable<Text>,
    }
}

diesel::joinable!(antonyms -> senses (sense_id));
diesel::joinable!(derived_terms -> entries (entry_id));
diesel::joinable!(forms -> entries (entry_id));
diesel::joinable!(noun_declensions -> words (word_id));
diesel::joinable!(related_terms -> entries (entry_id));
diesel::joinable!(senses -> entries (entry_id));
diesel::joinable!(synonyms -> senses (sense_id));
diesel::joinable!(verb_conjugations -> words (word_id));

diesel::allow_tables_to_appear_in_same_query!(
    antonyms,
    derived_terms,
    entries,
    forms,
    noun_declensions,
    related_terms,
    senses,
    synonyms,
    verb_conjugations,
    words,
);
