//! Full conformance runs over mappings written to a scratch directory.

use std::fs;
use std::path::Path;

use intermine_catalog::{Catalog, DatabaseNaming};
use r2rml_conformance::{run_all, MappingInputs, Severity};
use r2rml_mapping::serializer::turtle::to_turtle;
use r2rml_mapping::{generate, GeneratorConfig};
use serde_json::json;

fn catalog_json() -> serde_json::Value {
    json!({
        "name": "genomic",
        "classes": [
            {
                "name": "Organism",
                "fair_term": "http://purl.uniprot.org/core/Taxon",
                "fields": [
                    { "name": "taxonId", "kind": "attribute", "type": "java.lang.Integer" },
                    {
                        "name": "proteins",
                        "kind": "collection",
                        "referenced": "Protein",
                        "relation": "M_N",
                        "reverse": "organism"
                    }
                ]
            },
            {
                "name": "Protein",
                "fields": [
                    { "name": "primaryAccession", "kind": "attribute", "type": "java.lang.String" },
                    { "name": "length", "kind": "attribute", "type": "int" },
                    {
                        "name": "organism",
                        "kind": "collection",
                        "referenced": "Organism",
                        "relation": "M_N",
                        "reverse": "proteins"
                    }
                ]
            }
        ]
    })
}

fn write_inputs(dir: &Path, catalog: &serde_json::Value) -> MappingInputs {
    let catalog_path = dir.join("genomic_model.json");
    fs::write(&catalog_path, catalog.to_string()).expect("write catalog");
    MappingInputs {
        mapping: dir.join("mapping.ttl"),
        catalog: catalog_path,
        config: None,
    }
}

fn write_mapping(inputs: &MappingInputs, catalog: &serde_json::Value) {
    let catalog = Catalog::from_json_str(&catalog.to_string()).expect("valid catalog");
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");
    fs::write(&inputs.mapping, to_turtle(&doc)).expect("write mapping");
}

#[test]
fn fresh_mapping_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog_json();
    let inputs = write_inputs(dir.path(), &catalog);
    write_mapping(&inputs, &catalog);

    let report = run_all(&inputs).expect("conformance runs");
    let failures: Vec<_> = report.results.iter().filter(|r| r.is_failure()).collect();
    assert!(failures.is_empty(), "conformance failures: {failures:#?}");
    assert!(report.count(Severity::Pass) >= 6);
}

#[test]
fn missing_mapping_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = write_inputs(dir.path(), &catalog_json());

    let report = run_all(&inputs).expect("conformance runs");
    assert!(!report.all_passed());
    assert!(report
        .results
        .iter()
        .any(|r| r.validator == "mapping/rdf" && r.is_failure()));
}

#[test]
fn malformed_mapping_fails_rdf_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = write_inputs(dir.path(), &catalog_json());
    fs::write(&inputs.mapping, "@prefix rr: <http://www.w3.org/ns/r2rml#> .\n<urn:a> rr:b").expect("write");

    let report = run_all(&inputs).expect("conformance runs");
    let rdf_failures: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.validator == "mapping/rdf" && r.is_failure())
        .collect();
    assert_eq!(rdf_failures.len(), 2, "parse failure and missing prefixes");
}

#[test]
fn stale_mapping_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog_json();
    let inputs = write_inputs(dir.path(), &catalog);
    write_mapping(&inputs, &catalog);

    let mut grown = catalog.clone();
    grown["classes"][1]["fields"]
        .as_array_mut()
        .expect("fields array")
        .push(json!({ "name": "mass", "kind": "attribute", "type": "java.lang.Double" }));
    fs::write(&inputs.catalog, grown.to_string()).expect("rewrite catalog");

    let report = run_all(&inputs).expect("conformance runs");
    assert!(report
        .results
        .iter()
        .any(|r| r.is_failure() && r.message.starts_with("mapping file is out of date")));
}

#[test]
fn unloadable_catalog_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let inputs = MappingInputs {
        mapping: dir.path().join("mapping.ttl"),
        catalog: dir.path().join("absent.json"),
        config: None,
    };
    assert!(run_all(&inputs).is_err());
}
