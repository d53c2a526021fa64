//! Catalog coverage validator.
//!
//! Regenerates the mapping from the catalog and checks it class by class:
//! - every exportable, identifiable class has exactly one table TriplesMap
//! - no excluded class has one
//! - every view shares its subject template with a table TriplesMap
//! - every join names a TriplesMap that exists
//! - the mapping file on disk holds as many triples as the fresh generation

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use intermine_catalog::{Catalog, DatabaseNaming, NamingScheme};
use r2rml_mapping::builder::table_map_name;
use r2rml_mapping::{generate, GeneratorConfig, MappingBuilder, MappingDocument, ObjectMap};
use tracing::debug;

use super::rdf::triple_count;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "mapping/coverage";

/// Validates the mapping at `mapping` against `catalog` and `config`.
///
/// # Errors
///
/// Returns an error if the mapping file exists but cannot be read.
pub fn validate(
    catalog: &Catalog,
    config: &GeneratorConfig,
    mapping: &Path,
) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let naming = DatabaseNaming;

    let doc = match generate(catalog, &naming, config) {
        Ok(doc) => doc,
        Err(e) => {
            report.push(
                TestResult::fail(VALIDATOR, "catalog cannot be mapped")
                    .with_details(vec![e.to_string()]),
            );
            return Ok(report);
        }
    };
    debug!(statements = doc.len(), "regenerated mapping");

    validate_tables(catalog, config, &doc, &mut report);
    validate_excluded(catalog, config, &doc, &mut report);
    validate_views(&doc, &mut report);
    validate_joins(&doc, &mut report);
    validate_freshness(&doc, mapping, &mut report)?;

    Ok(report)
}

fn table_map_count(doc: &MappingDocument, name: &str) -> usize {
    doc.triples_maps()
        .iter()
        .filter(|m| !m.is_view() && m.name == name)
        .count()
}

fn validate_tables(
    catalog: &Catalog,
    config: &GeneratorConfig,
    doc: &MappingDocument,
    report: &mut ConformanceReport,
) {
    let naming = DatabaseNaming;
    let builder = MappingBuilder::new(catalog, &naming, config);

    let mut expected = 0usize;
    let mut issues = Vec::new();
    for class in catalog.classes() {
        if !builder.filter().is_exportable(class)
            || builder.resolver().identifying_attribute(class).is_none()
        {
            continue;
        }
        expected += 1;
        let name = table_map_name(&naming.table_name(class));
        match table_map_count(doc, &name) {
            1 => {}
            0 => issues.push(format!("{}: no TriplesMap", class.name)),
            n => issues.push(format!("{}: {n} TriplesMaps", class.name)),
        }
    }

    if issues.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{expected} identifiable classes each have one table TriplesMap"),
        ));
    } else {
        report.push(
            TestResult::fail(VALIDATOR, "identifiable classes without exactly one TriplesMap")
                .with_details(issues),
        );
    }
}

fn validate_excluded(
    catalog: &Catalog,
    config: &GeneratorConfig,
    doc: &MappingDocument,
    report: &mut ConformanceReport,
) {
    let naming = DatabaseNaming;
    let mut mapped = Vec::new();
    for excluded in &config.excluded_classes {
        let Some(class) = catalog.class(excluded) else {
            report.push(TestResult::warn(
                VALIDATOR,
                format!("excluded class {excluded} is not in the catalog"),
            ));
            continue;
        };
        if table_map_count(doc, &table_map_name(&naming.table_name(class))) > 0 {
            mapped.push(excluded.clone());
        }
    }

    if mapped.is_empty() {
        report.push(TestResult::pass(VALIDATOR, "no excluded class is mapped"));
    } else {
        report.push(TestResult::fail(VALIDATOR, "excluded classes are mapped").with_details(mapped));
    }
}

fn validate_views(doc: &MappingDocument, report: &mut ConformanceReport) {
    let templates: HashSet<&str> = doc
        .triples_maps()
        .iter()
        .filter(|m| !m.is_view())
        .map(|m| m.subject_map.template.as_str())
        .collect();
    let views: Vec<_> = doc.triples_maps().iter().filter(|m| m.is_view()).collect();

    if views.is_empty() {
        report.push(TestResult::warn(VALIDATOR, "mapping has no many-to-many views"));
        return;
    }

    let orphans: Vec<String> = views
        .iter()
        .filter(|v| !templates.contains(v.subject_map.template.as_str()))
        .map(|v| v.name.clone())
        .collect();
    if orphans.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{} views share their owner's subject template", views.len()),
        ));
    } else {
        report.push(
            TestResult::fail(VALIDATOR, "views with a subject template no table map uses")
                .with_details(orphans),
        );
    }
}

fn validate_joins(doc: &MappingDocument, report: &mut ConformanceReport) {
    let names: HashSet<&str> = doc.triples_maps().iter().map(|m| m.name.as_str()).collect();
    let mut total = 0usize;
    let mut dangling = Vec::new();
    for map in doc.triples_maps() {
        for join in map.joins() {
            if let ObjectMap::Join {
                parent_triples_map, ..
            } = join
            {
                total += 1;
                if !names.contains(parent_triples_map.as_str()) {
                    dangling.push(format!("{} -> {parent_triples_map}", map.name));
                }
            }
        }
    }

    if dangling.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{total} joins resolve to a TriplesMap"),
        ));
    } else {
        report.push(TestResult::fail(VALIDATOR, "dangling parent TriplesMaps").with_details(dangling));
    }
}

fn validate_freshness(
    doc: &MappingDocument,
    mapping: &Path,
    report: &mut ConformanceReport,
) -> Result<()> {
    if !mapping.exists() {
        report.push(TestResult::warn(
            VALIDATOR,
            "no mapping file to compare with the catalog",
        ));
        return Ok(());
    }
    let content = std::fs::read_to_string(mapping)
        .with_context(|| format!("Failed to read {}", mapping.display()))?;

    // A parse failure is reported by the rdf validator.
    let Ok(on_disk) = triple_count(&content) else {
        return Ok(());
    };
    if on_disk == doc.len() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("mapping file matches the catalog ({on_disk} triples)"),
        ));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!(
                "mapping file is out of date: {on_disk} triples on disk, {} expected",
                doc.len()
            ),
        ));
    }
    Ok(())
}
