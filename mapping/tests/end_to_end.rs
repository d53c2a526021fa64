//! Whole-document generation over synthetic and fixture catalogs.

use std::path::PathBuf;

use intermine_catalog::{Catalog, ClassDescriptor, DatabaseNaming, FieldDescriptor, RelationKind};
use r2rml_mapping::serializer::{ntriples, turtle};
use r2rml_mapping::{generate, vocab, GeneratorConfig, LogicalTable, MappingError, ObjectMap};
use sophia_api::prelude::*;
use sophia_inmem::graph::LightGraph;

fn fixture() -> Catalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/biotestmine.json");
    Catalog::load(&path).expect("fixture catalog loads")
}

fn organism_protein_catalog() -> Catalog {
    Catalog::new(
        "genomic",
        vec![
            ClassDescriptor::new("Organism")
                .with_fair_term(format!("{}Taxon", vocab::UP))
                .with_field(FieldDescriptor::attribute("taxonId", "java.lang.Integer"))
                .with_field(FieldDescriptor::collection(
                    "proteins",
                    "Protein",
                    RelationKind::MN,
                    Some("organism"),
                )),
            ClassDescriptor::new("Protein")
                .with_field(FieldDescriptor::attribute("primaryAccession", "java.lang.String"))
                .with_field(FieldDescriptor::collection(
                    "organism",
                    "Organism",
                    RelationKind::MN,
                    Some("proteins"),
                )),
        ],
    )
    .expect("valid catalog")
}

#[test]
fn organism_protein_many_to_many() {
    let catalog = organism_protein_catalog();
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");
    let maps = doc.triples_maps();

    let primary: Vec<_> = maps.iter().filter(|m| !m.is_view()).collect();
    let views: Vec<_> = maps.iter().filter(|m| m.is_view()).collect();
    assert_eq!(primary.len(), 2);
    assert_eq!(views.len(), 1);

    let organism = primary
        .iter()
        .find(|m| m.logical_table == LogicalTable::Table("Organism".to_owned()))
        .expect("Organism map");
    let view = views[0];
    assert_eq!(view.name, "urn:intermine-join-tables:Organism/OrganismProteins/Protein");
    assert!(view.logical_table.as_str().contains("OrganismProteins"));
    assert_eq!(view.subject_map, organism.subject_map);
    assert_eq!(
        organism.subject_map.template,
        "http://intermine.org/biotestmine/Organism/{taxonId}"
    );
    assert_eq!(
        view.predicate_object_maps[0].object_map,
        ObjectMap::Template {
            template: "http://purl.uniprot.org/uniprot/{Protein_primaryAccession}".to_owned()
        }
    );
}

#[test]
fn view_sql_is_deterministic() {
    let catalog = organism_protein_catalog();
    let config = GeneratorConfig::default();
    let first = generate(&catalog, &DatabaseNaming, &config).expect("generated");
    let second = generate(&catalog, &DatabaseNaming, &config).expect("generated");

    let sql = |doc: &r2rml_mapping::MappingDocument| {
        doc.triples_maps()
            .iter()
            .find(|m| m.is_view())
            .map(|m| m.logical_table.as_str().to_owned())
            .expect("a view")
    };
    assert_eq!(sql(&first), sql(&second));
    assert_eq!(
        sql(&first),
        "SELECT Organism.taxonId AS taxonId, Protein.primaryAccession AS Protein_primaryAccession \
         FROM Organism, OrganismProteins, Protein \
         WHERE Organism.id = OrganismProteins.organism AND Protein.id = OrganismProteins.proteins"
    );
    assert_eq!(turtle::to_turtle(&first), turtle::to_turtle(&second));
}

#[test]
fn format_version_zero_capitalises_indirection_columns() {
    let catalog = organism_protein_catalog();
    let config = GeneratorConfig {
        format_version: 0,
        ..GeneratorConfig::default()
    };
    let doc = generate(&catalog, &DatabaseNaming, &config).expect("generated");
    let view = doc.triples_maps().iter().find(|m| m.is_view()).expect("a view");
    assert!(view
        .logical_table
        .as_str()
        .ends_with("WHERE Organism.id = OrganismProteins.Organism AND Protein.id = OrganismProteins.Proteins"));
}

#[test]
fn unsupported_format_version_is_not_a_schema_mismatch() {
    let catalog = organism_protein_catalog();
    let config = GeneratorConfig {
        format_version: 7,
        ..GeneratorConfig::default()
    };
    let err = generate(&catalog, &DatabaseNaming, &config).expect_err("version 7 is unknown");
    assert!(matches!(err, MappingError::Naming(_)));
    assert!(!err.is_fatal_schema_mismatch());
}

#[test]
fn unknown_primitive_type_stops_generation() {
    let catalog = Catalog::new(
        "genomic",
        vec![
            ClassDescriptor::new("Gene")
                .with_field(FieldDescriptor::attribute("primaryIdentifier", "java.lang.String"))
                .with_field(FieldDescriptor::attribute("length", "java.lang.Long")),
            ClassDescriptor::new("Exon")
                .with_field(FieldDescriptor::attribute("primaryIdentifier", "java.lang.String")),
        ],
    )
    .expect("valid catalog");
    let err = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default())
        .expect_err("Long is not a recognised type");
    assert!(err.is_fatal_schema_mismatch());
}

#[test]
fn fixture_catalog_maps_every_identifiable_class() {
    let catalog = fixture();
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");

    let tables: Vec<_> = doc
        .triples_maps()
        .iter()
        .filter(|m| !m.is_view())
        .map(|m| m.logical_table.as_str())
        .collect();
    assert_eq!(tables, ["Gene", "Exon", "Protein", "Organism", "Publication"]);

    let views: Vec<_> = doc
        .triples_maps()
        .iter()
        .filter(|m| m.is_view())
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(
        views,
        [
            "urn:intermine-join-tables:Gene/BioEntitiesPublications/Publication",
            "urn:intermine-join-tables:Exon/BioEntitiesPublications/Publication",
            "urn:intermine-join-tables:Protein/BioEntitiesPublications/Publication",
        ]
    );
}

#[test]
fn fixture_literals_carry_xsd_datatypes() {
    let catalog = fixture();
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");

    let protein = doc
        .triples_maps()
        .iter()
        .find(|m| m.name == "urn:intermine-table:Protein")
        .expect("Protein map");
    let fragment = protein
        .predicate_object_maps
        .iter()
        .find(|p| p.predicate == "http://purl.uniprot.org/core/fragment")
        .expect("isFragment");
    assert_eq!(
        fragment.object_map,
        ObjectMap::Column {
            column: "isFragment".to_owned(),
            datatype: vocab::xsd::BOOLEAN,
        }
    );

    let gene = doc
        .triples_maps()
        .iter()
        .find(|m| m.name == "urn:intermine-table:Gene")
        .expect("Gene map");
    let exon_join = gene.joins().find(|j| {
        matches!(j, ObjectMap::Join { parent_triples_map, .. } if parent_triples_map == "urn:intermine-table:Exon")
    });
    assert_eq!(
        exon_join,
        Some(&ObjectMap::Join {
            parent_triples_map: "urn:intermine-table:Exon".to_owned(),
            child: "id".to_owned(),
            parent: "geneid".to_owned(),
        })
    );
}

#[test]
fn excluded_classes_get_no_map() {
    let catalog = fixture();
    let config = GeneratorConfig {
        excluded_classes: vec!["InterMineObject".to_owned(), "BioEntity".to_owned(), "Exon".to_owned()],
        ..GeneratorConfig::default()
    };
    let doc = generate(&catalog, &DatabaseNaming, &config).expect("generated");
    assert!(doc.triples_maps().iter().all(|m| !m.name.contains("Exon")));
    let gene = doc
        .triples_maps()
        .iter()
        .find(|m| m.name == "urn:intermine-table:Gene")
        .expect("Gene map");
    assert!(gene.joins().all(|j| !matches!(j, ObjectMap::Join { child, .. } if child == "id")));
}

#[test]
fn turtle_and_ntriples_describe_the_same_graph() {
    let catalog = fixture();
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");

    let ttl = turtle::to_turtle(&doc);
    let from_turtle: LightGraph = sophia_turtle::parser::turtle::parse_str(&ttl)
        .collect_triples()
        .expect("valid Turtle");
    let nt = ntriples::to_ntriples(&doc);
    let from_ntriples: LightGraph = sophia_turtle::parser::nt::parse_str(&nt)
        .collect_triples()
        .expect("valid N-Triples");

    assert_eq!(from_turtle.triples().count(), doc.len());
    assert_eq!(from_ntriples.triples().count(), doc.len());
    for (prefix, _) in r2rml_mapping::PREFIXES {
        assert!(ttl.contains(&format!("@prefix {prefix}: ")), "missing @prefix {prefix}");
    }
}

#[test]
fn many_to_many_fans_out_on_the_target_side() {
    let catalog = Catalog::new(
        "genomic",
        vec![
            ClassDescriptor::new("Publication")
                .with_field(FieldDescriptor::attribute("pubMedId", "java.lang.String"))
                .with_field(FieldDescriptor::collection(
                    "bioEntities",
                    "BioEntity",
                    RelationKind::MN,
                    Some("publications"),
                )),
            ClassDescriptor::new("BioEntity")
                .with_field(FieldDescriptor::attribute("primaryIdentifier", "java.lang.String"))
                .with_field(FieldDescriptor::collection(
                    "publications",
                    "Publication",
                    RelationKind::MN,
                    Some("bioEntities"),
                )),
            ClassDescriptor::new("Gene").extending("BioEntity"),
            ClassDescriptor::new("Exon").extending("BioEntity"),
        ],
    )
    .expect("valid catalog");
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");

    let views: Vec<_> = doc
        .triples_maps()
        .iter()
        .filter(|m| m.is_view())
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(
        views,
        [
            "urn:intermine-join-tables:Publication/BioEntitiesPublications/Gene",
            "urn:intermine-join-tables:Publication/BioEntitiesPublications/Exon",
        ],
        "the inherited reverse collection on Gene and Exon is not mapped again"
    );

    let exon_view = doc
        .triples_maps()
        .iter()
        .find(|m| m.name.ends_with("/Exon") && m.is_view())
        .expect("Exon view");
    assert_eq!(
        exon_view.predicate_object_maps[0].object_map,
        ObjectMap::Template {
            template: "http://intermine.org/biotestmine/Exon/{Exon_primaryIdentifier}".to_owned()
        }
    );
}

#[test]
fn one_to_many_fans_out_to_each_subclass() {
    let catalog = Catalog::new(
        "genomic",
        vec![
            ClassDescriptor::new("Organism")
                .with_field(FieldDescriptor::attribute("taxonId", "java.lang.Integer"))
                .with_field(FieldDescriptor::collection(
                    "features",
                    "SequenceFeature",
                    RelationKind::OneN,
                    Some("organism"),
                )),
            ClassDescriptor::new("SequenceFeature")
                .with_field(FieldDescriptor::attribute("primaryIdentifier", "java.lang.String"))
                .with_field(FieldDescriptor::reference("organism", "Organism").with_reverse("features")),
            ClassDescriptor::new("Gene").extending("SequenceFeature"),
            ClassDescriptor::new("Exon").extending("SequenceFeature"),
        ],
    )
    .expect("valid catalog");
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");

    let organism = doc
        .triples_maps()
        .iter()
        .find(|m| m.name == "urn:intermine-table:Organism")
        .expect("Organism map");
    let joins: Vec<_> = organism.joins().cloned().collect();
    assert_eq!(
        joins,
        [
            ObjectMap::Join {
                parent_triples_map: "urn:intermine-table:Gene".to_owned(),
                child: "id".to_owned(),
                parent: "organismid".to_owned(),
            },
            ObjectMap::Join {
                parent_triples_map: "urn:intermine-table:Exon".to_owned(),
                child: "id".to_owned(),
                parent: "organismid".to_owned(),
            },
        ]
    );
}

#[test]
fn identical_fragments_of_different_classes_stay_separate() {
    let catalog = Catalog::new(
        "genomic",
        vec![
            ClassDescriptor::new("DataSet")
                .with_field(FieldDescriptor::attribute("name", "java.lang.String"))
                .with_field(FieldDescriptor::attribute("version", "java.lang.String")),
            ClassDescriptor::new("DataSource")
                .with_field(FieldDescriptor::attribute("name", "java.lang.String"))
                .with_field(FieldDescriptor::attribute("version", "java.lang.String")),
        ],
    )
    .expect("valid catalog");
    let doc = generate(&catalog, &DatabaseNaming, &GeneratorConfig::default()).expect("generated");

    let version = r2rml_mapping::Term::literal("version");
    let object_maps: Vec<_> = doc
        .statements()
        .iter()
        .filter(|s| s.predicate == vocab::rr::COLUMN && s.object == version)
        .map(|s| &s.subject)
        .collect();
    assert_eq!(object_maps.len(), 2);
    assert_ne!(object_maps[0], object_maps[1]);

    let datatypes = doc
        .statements()
        .iter()
        .filter(|s| s.predicate == vocab::rr::DATATYPE)
        .count();
    assert_eq!(datatypes, 2, "one datatype statement per object map");
}
