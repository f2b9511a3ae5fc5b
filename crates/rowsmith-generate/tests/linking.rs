use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rowsmith_core::LinkRef;
use rowsmith_generate::link::LinkResolver;
use rowsmith_generate::{DataPaths, GenerationError};

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("rowsmith_linking_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_users(dir: &Path) {
    fs::write(
        dir.join("users.vdef.json"),
        r#"{
            "column_order": ["id", "name"],
            "columns": {
                "id":   { "type": "S", "format": "uuid" },
                "name": { "type": "S", "format": "enum", "range": "ann,bo" }
            }
        }"#,
    )
    .expect("write users vdef");
    fs::write(
        dir.join("users.csv"),
        "id,name\nu_one,ann\nu_two,bo\nu_three,cy\n",
    )
    .expect("write users csv");
}

fn paths(dir: &Path) -> DataPaths {
    DataPaths {
        schema_dir: Some(dir.to_path_buf()),
        data_dir: Some(dir.to_path_buf()),
    }
}

#[test]
fn keys_come_from_the_observed_key_set() {
    let dir = temp_dir("keyset");
    write_users(&dir);
    let paths = paths(&dir);
    let link = LinkRef {
        table: "users".to_string(),
        key_column: "id".to_string(),
    };

    let mut resolver = LinkResolver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..50 {
        let key = resolver
            .resolve_key(&link, &paths, &mut rng)
            .expect("resolve key");
        assert!(["u_one", "u_two", "u_three"].contains(&key.as_str()));
    }
}

#[test]
fn linked_dataset_is_read_exactly_once() {
    let dir = temp_dir("cached");
    write_users(&dir);
    let paths = paths(&dir);
    let link = LinkRef {
        table: "users".to_string(),
        key_column: "id".to_string(),
    };

    let mut resolver = LinkResolver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(!resolver.is_cached("users"));
    resolver
        .resolve_key(&link, &paths, &mut rng)
        .expect("first resolve");
    assert!(resolver.is_cached("users"));

    // removing the backing files proves later samples hit the cache
    fs::remove_file(dir.join("users.csv")).expect("remove users.csv");
    fs::remove_file(dir.join("users.vdef.json")).expect("remove users vdef");
    let key = resolver
        .resolve_key(&link, &paths, &mut rng)
        .expect("second resolve from cache");
    assert!(["u_one", "u_two", "u_three"].contains(&key.as_str()));
}

#[test]
fn key_index_follows_the_linked_schema() {
    let dir = temp_dir("index");
    write_users(&dir);
    let paths = paths(&dir);
    let link = LinkRef {
        table: "users".to_string(),
        key_column: "name".to_string(),
    };

    let mut resolver = LinkResolver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let key = resolver
        .resolve_key(&link, &paths, &mut rng)
        .expect("resolve key");
    assert!(["ann", "bo", "cy"].contains(&key.as_str()));
}

#[test]
fn missing_data_file_is_fatal() {
    let dir = temp_dir("nodata");
    write_users(&dir);
    fs::remove_file(dir.join("users.csv")).expect("remove users.csv");
    let paths = paths(&dir);
    let link = LinkRef {
        table: "users".to_string(),
        key_column: "id".to_string(),
    };

    let mut resolver = LinkResolver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let result = resolver.resolve_key(&link, &paths, &mut rng);
    assert!(matches!(
        result,
        Err(GenerationError::LinkedDataNotFound { .. })
    ));
}

#[test]
fn unknown_key_column_is_a_schema_error() {
    let dir = temp_dir("badkey");
    write_users(&dir);
    let paths = paths(&dir);
    let link = LinkRef {
        table: "users".to_string(),
        key_column: "missing".to_string(),
    };

    let mut resolver = LinkResolver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let result = resolver.resolve_key(&link, &paths, &mut rng);
    assert!(matches!(result, Err(GenerationError::Schema(_))));
}
