//! End-to-end pipeline behaviour on small thesaurus documents.

use inis_thesaurus::{
    pipeline, BoldMarkup, ContinuationMode, RelationKind, ThesaurusConfig, ThesaurusDate,
    ThesaurusError, WarningKind,
};

fn run(text: &str) -> inis_thesaurus::ConceptScheme {
    pipeline::run(text, &ThesaurusConfig::default()).expect("pipeline should succeed")
}

fn with_continuation(mode: ContinuationMode) -> ThesaurusConfig {
    let mut config = ThesaurusConfig::default();
    config.parse.continuation = mode;
    config
}

/// `BT` without a reciprocal `NT` still yields the narrower edge.
#[test]
fn reactor_physics_gains_inverse_edge() {
    let scheme = run("<bold>Reactor physics</bold>\nBT Nuclear engineering\n<bold>Nuclear engineering</bold>\n");
    let eng = scheme.find_by_label("Nuclear engineering").expect("concept");
    let physics = scheme.find_by_label("Reactor physics").expect("concept");
    assert!(eng.narrower.contains(&physics.id));
    assert!(eng.is_top_concept);
    assert!(!physics.is_top_concept);
}

/// A `USE` block contributes only an alternate label to its target.
#[test]
fn fission_redirect_is_suppressed() {
    let scheme = run(
        "<bold>Fission</bold> 1975 (nuclear process)\n\
         BT Nuclear reactions\n\
         NT Fast fission\n\
         USE Nuclear fission\n\
         <bold>Fast fission</bold>\n\
         <bold>Nuclear fission</bold>\n\
         <bold>Nuclear reactions</bold>\n",
    );
    assert!(scheme.find_by_label("Fission").is_none());
    let target = scheme.find_by_label("Nuclear fission").expect("target");
    assert!(target.alt_labels.contains("Fission"));
    assert!(target.history_notes.is_empty());
    assert!(target.broader.is_empty());
    assert_eq!(scheme.concept_count(), 3);
    assert_eq!(scheme.stats().redirect_blocks, 1);
    assert_eq!(scheme.stats().redirects_applied, 1);
}

#[test]
fn see_behaves_like_use() {
    let scheme = run("<bold>ATOMS</bold>\n<bold>ATOM</bold>\nSEE ATOMS\n");
    assert!(scheme.find_by_label("ATOM").is_none());
    assert!(scheme.find_by_label("ATOMS").expect("atoms").alt_labels.contains("ATOM"));
}

#[test]
fn dates_follow_the_count_rule() {
    let scheme = run(
        "<bold>NONE</bold>\n\
         <bold>BARE</bold> 1996-06-28\n\
         <bold>LABELED</bold> INIS: 1996-06-28; ETDE: 2002-04\n\
         <bold>AMBIGUOUS</bold> 1975 1980 1990\n",
    );
    let none = scheme.find_by_label("NONE").expect("NONE");
    assert!(none.introduced.inis.is_none() && none.introduced.etde.is_none());

    let bare = scheme.find_by_label("BARE").expect("BARE");
    assert!(bare.introduced.inis.is_some());
    assert_eq!(bare.introduced.inis, bare.introduced.etde);

    let labeled = scheme.find_by_label("LABELED").expect("LABELED");
    assert_eq!(
        labeled.introduced.inis.map(|d| d.lexical()).as_deref(),
        Some("1996-06-28")
    );
    assert_eq!(labeled.introduced.etde, Some(ThesaurusDate::YearMonth(2002, 4)));

    let ambiguous = scheme.find_by_label("AMBIGUOUS").expect("AMBIGUOUS");
    assert!(ambiguous.introduced.inis.is_none() && ambiguous.introduced.etde.is_none());
    assert_eq!(ambiguous.warnings[0].kind, WarningKind::AmbiguousDateFormat);
}

/// Warnings never stop the run; they are summarized on the scheme.
#[test]
fn warnings_are_collected_not_fatal() {
    let scheme = run(
        "<bold>A</bold> 1975 1976\n\
         Unclosed (note\n\
         BT\n\
         <bold>B</bold>\n\
         USE C\n\
         <bold>C</bold> 1999-13-01\n",
    );
    assert_eq!(scheme.concept_count(), 2);
    let counts = scheme.warning_counts();
    assert_eq!(counts.get(&WarningKind::AmbiguousDateFormat), Some(&1));
    assert_eq!(counts.get(&WarningKind::MalformedBlock), Some(&3));
}

#[test]
fn unresolved_reference_names_label_and_kind() {
    let err = pipeline::run(
        "<bold>A</bold>\nRT NOWHERE\n",
        &ThesaurusConfig::default(),
    )
    .expect_err("must fail");
    assert_eq!(
        err.to_string(),
        "unresolved Related reference from `A` to `NOWHERE`"
    );
    assert!(matches!(
        err,
        ThesaurusError::UnresolvedReference {
            kind: RelationKind::Related,
            ..
        }
    ));
}

#[test]
fn duplicate_descriptor_is_fatal() {
    let err = pipeline::run(
        "<bold>Neutron flux</bold>\n<bold>NEUTRON-FLUX</bold>\n",
        &ThesaurusConfig::default(),
    )
    .expect_err("must fail");
    assert!(matches!(err, ThesaurusError::DuplicateLabel { .. }));
}

/// The continuation rule changes how many targets a wrapped line yields.
#[test]
fn continuation_modes_differ_on_wrapped_lines() {
    let text = "<bold>A</bold>\nRT B\nC\n<bold>B</bold>\n<bold>C</bold>\n<bold>B C</bold>\n";

    let joined = pipeline::run(text, &with_continuation(ContinuationMode::Joined)).expect("joined");
    let a = joined.find_by_label("A").expect("A");
    assert_eq!(a.related.len(), 1);
    assert!(a.related.iter().any(|id| id.as_str() == "b-c"));

    let split =
        pipeline::run(text, &with_continuation(ContinuationMode::OnePerLine)).expect("split");
    let a = split.find_by_label("A").expect("A");
    assert_eq!(a.related.len(), 2);
    assert!(a.related.iter().any(|id| id.as_str() == "b"));
    assert!(a.related.iter().any(|id| id.as_str() == "c"));
}

#[test]
fn hierarchy_cycles_are_representable() {
    let scheme = run("<bold>A</bold>\nBT B\n<bold>B</bold>\nBT A\n");
    let a = scheme.find_by_label("A").expect("A");
    let b = scheme.find_by_label("B").expect("B");
    assert!(a.broader.contains(&b.id) && a.narrower.contains(&b.id));
    assert!(b.broader.contains(&a.id) && b.narrower.contains(&a.id));
    assert_eq!(scheme.top_concept_count(), 0);
}

#[test]
fn markdown_markup_and_preamble() {
    let mut config = ThesaurusConfig::default();
    config.parse.bold = BoldMarkup::markdown();
    let scheme = pipeline::run(
        "INIS Thesaurus\nIAEA, Vienna\n\n**Fission**\nUSE Nuclear fission\n**Nuclear fission**\n",
        &config,
    )
    .expect("pipeline");
    assert_eq!(scheme.concept_count(), 1);
    assert_eq!(scheme.stats().blocks, 2);
}

#[test]
fn level_coded_hierarchy_uses_direct_neighbours_only() {
    let scheme = run(
        "<bold>ABSORPTION</bold>\n\
         BT1 SORPTION\n\
         BT2 SURFACE PROCESSES\n\
         NT1 NEUTRON ABSORPTION\n\
         <bold>NEUTRON ABSORPTION</bold>\n\
         <bold>SORPTION</bold>\n",
    );
    let absorption = scheme.find_by_label("ABSORPTION").expect("absorption");
    assert_eq!(absorption.broader.len(), 1);
    assert_eq!(absorption.narrower.len(), 1);
}

/// Years in prose on the label line are part of the definition, not dates.
#[test]
fn label_line_prose_is_a_definition() {
    let scheme = run("<bold>REACTORS</bold> Plants built after 1990.\n");
    let reactors = scheme.find_by_label("REACTORS").expect("reactors");
    assert!(reactors.introduced.inis.is_none() && reactors.introduced.etde.is_none());
    assert_eq!(reactors.definition.as_deref(), Some("Plants built after 1990."));
    assert!(reactors.warnings.is_empty());
}

/// Targets lose their parentheticals during extraction; labels keep them.
#[test]
fn qualified_label_is_a_valid_target() {
    let scheme = run(
        "<bold>MIXED OXIDE FUELS (MOX)</bold>\n\
         <bold>A</bold>\n\
         BT MIXED OXIDE FUELS (MOX)\n",
    );
    let mox = scheme.find_by_label("MIXED OXIDE FUELS (MOX)").expect("mox");
    let a = scheme.find_by_label("A").expect("a");
    assert!(a.broader.contains(&mox.id));
    assert!(mox.narrower.contains(&a.id));
    assert!(mox.is_top_concept);
}

/// A block whose label derives the same id as a redirect source is that source.
#[test]
fn variant_spelling_of_a_redirect_source_is_suppressed() {
    let scheme = run(
        "<bold>U 235</bold>\n\
         <bold>U-235</bold>\n\
         USE URANIUM 235\n\
         <bold>URANIUM 235</bold>\n",
    );
    assert!(scheme.find_by_label("U-235").is_none());
    assert_eq!(scheme.concept_count(), 1);
    let uranium = scheme.find_by_label("URANIUM 235").expect("uranium");
    assert!(uranium.alt_labels.contains("U-235"));
    assert_eq!(scheme.stats().redirect_blocks, 2);
}

/// A removed note does not leave a space before the following punctuation.
#[test]
fn definitions_have_no_space_before_punctuation() {
    let scheme = run("<bold>REACTOR PHYSICS</bold>\nPhysics of reactors (since 1996).\n");
    let physics = scheme.find_by_label("REACTOR PHYSICS").expect("physics");
    assert_eq!(physics.definition.as_deref(), Some("Physics of reactors."));
    assert_eq!(physics.history_notes, vec!["since 1996"]);
}
