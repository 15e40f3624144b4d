use tempfile::TempDir;

use gifkeep::{
    codec::{json::JsonCollectionCodec, CollectionCodec},
    engine::favorites::{EngineConfig, FavoritesEngine},
    persist::sqlite::{MirroredSettings, SqliteMirror},
    record::FavoriteDraft,
    sync::{SettingsSync, SettingsUpdate, FAVORITES_SCHEMA_ID, USER_SETTINGS_PROTO_UPDATE},
    types::MediaFormat,
};

fn add(engine: &FavoritesEngine<JsonCollectionCodec, MirroredSettings>, url: &str) -> bool {
    engine.try_add_favorite(url, url, MediaFormat::DirectFile, 100, 80)
}

#[test]
fn published_state_survives_reopen() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("settings.db");

    let settings = MirroredSettings::open(&path).expect("open");
    let engine = FavoritesEngine::new(JsonCollectionCodec, settings, 1, EngineConfig::default());
    assert!(add(&engine, "https://cdn.example/a.gif"));
    assert!(add(&engine, "https://cdn.example/b.gif"));
    drop(engine);

    let reopened = MirroredSettings::open(&path).expect("reopen");
    let favorites = reopened
        .snapshot()
        .expect("snapshot")
        .favorites
        .expect("favorites");
    assert_eq!(
        favorites.ordered_keys(),
        &[
            "https://cdn.example/a.gif".to_string(),
            "https://cdn.example/b.gif".to_string(),
        ]
    );

    let engine = FavoritesEngine::new(JsonCollectionCodec, reopened, 1, EngineConfig::default());
    assert!(!add(&engine, "https://cdn.example/a.gif"));
    assert!(add(&engine, "https://cdn.example/c.gif"));
}

#[test]
fn journal_records_wellformed_envelopes_in_order() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("settings.db");

    let settings = MirroredSettings::open(&path).expect("open");
    let engine = FavoritesEngine::new(JsonCollectionCodec, settings, 1, EngineConfig::default());
    assert!(add(&engine, "https://cdn.example/a.gif"));
    assert!(add(&engine, "https://cdn.example/b.gif"));
    drop(engine);

    let mirror = SqliteMirror::open(&path).expect("open mirror");
    let updates = mirror.load_updates_after(0).expect("updates");
    assert_eq!(updates.len(), 2);
    assert_eq!(mirror.latest_seq().expect("seq"), 2);

    for update in &updates {
        assert_eq!(update.kind, USER_SETTINGS_PROTO_UPDATE);
        assert!(update.local);
        assert!(update.partial);
        assert_eq!(update.settings.schema, FAVORITES_SCHEMA_ID);
    }

    let codec = JsonCollectionCodec;
    let first = codec.decode(&updates[0].settings.proto).expect("decode");
    let second = codec.decode(&updates[1].settings.proto).expect("decode");
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);

    assert!(mirror.load_updates_after(2).expect("tail").is_empty());
}

#[test]
fn compaction_drops_journal_rows_but_keeps_the_blob() {
    let codec = JsonCollectionCodec;
    let mut mirror = SqliteMirror::open_in_memory().expect("open");

    let mut collection = codec.create_empty();
    for i in 0..2u32 {
        let url = format!("https://cdn.example/{i}.gif");
        collection
            .insert(codec.new_record(FavoriteDraft {
                format: MediaFormat::DirectFile,
                url: url.clone(),
                src: url,
                width: 10,
                height: 10,
                order: i as i64,
            }))
            .expect("insert");
        let update =
            SettingsUpdate::partial_favorites(codec.encode(&collection).expect("encode"));
        mirror.record_update(&update).expect("record");
    }

    let last = mirror.latest_seq().expect("seq");
    assert_eq!(last, 2);

    let removed = mirror.compact_through(last).expect("compact");
    assert_eq!(removed, 2);
    assert!(mirror.load_updates_after(0).expect("updates").is_empty());

    let blob = mirror.load_collection().expect("load").expect("blob");
    let replayed = codec.decode(&blob).expect("decode");
    assert_eq!(replayed.len(), 2);
}

#[test]
fn duplicate_attempt_never_disturbs_mirrored_state() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("settings.db");

    let settings = MirroredSettings::open(&path).expect("open");
    let engine = FavoritesEngine::new(JsonCollectionCodec, settings, 1, EngineConfig::default());
    assert!(add(&engine, "https://cdn.example/a.gif"));

    // A failed duplicate attempt must leave both the memory and mirror state alone.
    assert!(!add(&engine, "https://cdn.example/a.gif"));
    drop(engine);

    let mirror = SqliteMirror::open(&path).expect("open mirror");
    assert_eq!(mirror.latest_seq().expect("seq"), 1);
    assert_eq!(mirror.load_updates_after(0).expect("updates").len(), 1);
}
