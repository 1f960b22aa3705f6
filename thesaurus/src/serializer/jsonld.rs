//! JSON-LD 1.1 serializer producing a SKOS concept scheme.
//!
//! The document holds a single `@context` and an `@graph` array: the
//! `skos:ConceptScheme` node first, then one `skos:Concept` node per concept in
//! id order.

use serde_json::{json, Map, Value};

use crate::model::{iris, Concept, ConceptId, ConceptScheme, ThesaurusDate};
use crate::serializer::{concept_curie, SCHEME_CURIE};

/// Serializes the concept scheme to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(scheme: &ConceptScheme) -> Value {
    json!({
        "@context": build_context(scheme),
        "@graph": build_graph(scheme)
    })
}

fn build_context(scheme: &ConceptScheme) -> Value {
    let mut ctx = Map::new();
    ctx.insert("skos".to_owned(), json!(iris::SKOS));
    ctx.insert("owl".to_owned(), json!(iris::OWL));
    ctx.insert("rdf".to_owned(), json!(iris::RDF));
    ctx.insert("rdfs".to_owned(), json!(iris::RDFS));
    ctx.insert("xsd".to_owned(), json!(iris::XSD));
    ctx.insert("dct".to_owned(), json!(iris::DCT));
    ctx.insert("inis".to_owned(), json!(scheme.metadata().base_iri));
    Value::Object(ctx)
}

fn build_graph(scheme: &ConceptScheme) -> Value {
    let lang = scheme.metadata().language.as_deref();
    let mut nodes: Vec<Value> = Vec::with_capacity(scheme.concept_count() + 1);
    nodes.push(scheme_to_json(scheme, lang));
    for concept in scheme.concepts() {
        nodes.push(concept_to_json(concept, lang));
    }
    Value::Array(nodes)
}

fn scheme_to_json(scheme: &ConceptScheme, lang: Option<&str>) -> Value {
    let meta = scheme.metadata();
    let tops: Vec<Value> = scheme.top_concepts().map(|c| id_ref(&c.id)).collect();
    let mut node = json!({
        "@id": SCHEME_CURIE,
        "@type": "skos:ConceptScheme",
        "dct:title": text(&meta.title, lang),
        "skos:hasTopConcept": tops
    });
    if let Some(issued) = &meta.issued {
        node["dct:issued"] = json!(issued);
    }
    if let Some(publisher) = &meta.publisher {
        node["dct:publisher"] = json!(publisher);
    }
    if let Some(language) = lang {
        node["dct:language"] = json!(language);
    }
    node
}

fn concept_to_json(concept: &Concept, lang: Option<&str>) -> Value {
    let alt_labels: Vec<Value> = concept.alt_labels.iter().map(|l| text(l, lang)).collect();
    let notes: Vec<Value> = concept.history_notes.iter().map(|n| text(n, lang)).collect();

    let mut node = json!({
        "@id": concept_curie(&concept.id),
        "@type": "skos:Concept",
        "skos:inScheme": { "@id": SCHEME_CURIE },
        "skos:prefLabel": text(&concept.pref_label, lang),
        "skos:altLabel": alt_labels,
        "skos:historyNote": notes,
        "skos:broader": id_refs(concept.broader.iter()),
        "skos:narrower": id_refs(concept.narrower.iter()),
        "skos:related": id_refs(concept.related.iter())
    });
    if let Some(definition) = &concept.definition {
        node["skos:definition"] = text(definition, lang);
    }
    if concept.is_top_concept {
        node["skos:topConceptOf"] = json!({ "@id": SCHEME_CURIE });
    }
    if let Some(date) = &concept.introduced.inis {
        node["inis:introducedINIS"] = date_literal(date);
    }
    if let Some(date) = &concept.introduced.etde {
        node["inis:introducedETDE"] = date_literal(date);
    }
    node
}

/// A plain or language-tagged string literal.
fn text(value: &str, lang: Option<&str>) -> Value {
    match lang {
        Some(lang) => json!({ "@value": value, "@language": lang }),
        None => json!(value),
    }
}

fn id_ref(id: &ConceptId) -> Value {
    json!({ "@id": concept_curie(id) })
}

fn id_refs<'a>(ids: impl Iterator<Item = &'a ConceptId>) -> Value {
    Value::Array(ids.map(id_ref).collect())
}

fn date_literal(date: &ThesaurusDate) -> Value {
    json!({ "@value": date.lexical(), "@type": date.xsd_curie() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThesaurusConfig;
    use crate::pipeline;

    fn sample() -> ConceptScheme {
        let text = "<bold>NUCLEAR ENGINEERING</bold>\n\
                    <bold>REACTOR PHYSICS</bold> INIS: 1996-06-28; ETDE: 2002-04-26\n\
                    Physics of reactors (since 1996).\n\
                    BT NUCLEAR ENGINEERING\n\
                    RT NEUTRONS\n\
                    UF core physics\n\
                    <bold>NEUTRONS</bold> 1975\n\
                    <bold>NEUTRON PHYSICS</bold>\n\
                    USE REACTOR PHYSICS\n";
        pipeline::run(text, &ThesaurusConfig::default()).unwrap()
    }

    fn node<'a>(graph: &'a [Value], id: &str) -> &'a Value {
        graph.iter().find(|n| n["@id"] == id).unwrap()
    }

    #[test]
    fn produces_context_and_graph() {
        let json = to_json_ld(&sample());
        assert!(json["@context"].is_object());
        assert_eq!(json["@context"]["inis"], "https://inis.iaea.org/thesaurus/");
        assert!(json["@graph"].is_array());
    }

    #[test]
    fn graph_has_scheme_and_every_concept() {
        let scheme = sample();
        let json = to_json_ld(&scheme);
        let graph = json["@graph"].as_array().expect("@graph must be array");
        assert_eq!(graph.len(), scheme.concept_count() + 1);
        assert_eq!(graph[0]["@type"], "skos:ConceptScheme");
        for (i, n) in graph.iter().enumerate() {
            assert!(!n["@id"].is_null(), "Node at index {i} is missing @id");
        }
    }

    #[test]
    fn top_concepts_are_listed_on_the_scheme() {
        let json = to_json_ld(&sample());
        let graph = json["@graph"].as_array().unwrap();
        let tops: Vec<&str> = graph[0]["skos:hasTopConcept"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["@id"].as_str().unwrap())
            .collect();
        assert_eq!(tops, vec!["inis:neutrons", "inis:nuclear-engineering"]);
        let neutrons = node(graph, "inis:neutrons");
        assert_eq!(neutrons["skos:topConceptOf"]["@id"], "inis:scheme");
        let physics = node(graph, "inis:reactor-physics");
        assert!(physics.get("skos:topConceptOf").is_none());
    }

    #[test]
    fn concept_fields_are_emitted() {
        let json = to_json_ld(&sample());
        let graph = json["@graph"].as_array().unwrap();
        let physics = node(graph, "inis:reactor-physics");
        assert_eq!(physics["skos:prefLabel"]["@value"], "REACTOR PHYSICS");
        assert_eq!(physics["skos:prefLabel"]["@language"], "en");
        assert_eq!(physics["skos:definition"]["@value"], "Physics of reactors.");
        assert_eq!(physics["skos:historyNote"][0]["@value"], "since 1996");
        assert_eq!(physics["skos:broader"][0]["@id"], "inis:nuclear-engineering");
        assert_eq!(physics["skos:related"][0]["@id"], "inis:neutrons");
        let alts: Vec<&str> = physics["skos:altLabel"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["@value"].as_str().unwrap())
            .collect();
        assert_eq!(alts, vec!["NEUTRON PHYSICS", "core physics"]);
        assert_eq!(physics["inis:introducedINIS"]["@value"], "1996-06-28");
        assert_eq!(physics["inis:introducedINIS"]["@type"], "xsd:date");
        assert_eq!(physics["inis:introducedETDE"]["@value"], "2002-04-26");
    }

    #[test]
    fn unset_dates_and_definition_are_omitted() {
        let json = to_json_ld(&sample());
        let graph = json["@graph"].as_array().unwrap();
        let eng = node(graph, "inis:nuclear-engineering");
        assert!(eng.get("inis:introducedINIS").is_none());
        assert!(eng.get("skos:definition").is_none());
        let neutrons = node(graph, "inis:neutrons");
        assert_eq!(neutrons["inis:introducedETDE"]["@type"], "xsd:gYear");
    }

    #[test]
    fn redirected_term_has_no_node() {
        let json = to_json_ld(&sample());
        let graph = json["@graph"].as_array().unwrap();
        assert!(graph.iter().all(|n| n["@id"] != "inis:neutron-physics"));
    }
}
