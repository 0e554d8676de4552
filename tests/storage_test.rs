use scriptdesk_rust::storage::{ChatStore, UserStore};
use scriptdesk_rust::{Character, Location, Scene};

#[test]
fn seeded_script_supports_queries_and_export_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = UserStore::open(dir.path()).unwrap();
    let script_id = store.seed_sample_data().unwrap();

    assert!(store.authenticate_user("Test", "test123").unwrap());
    assert!(!store.authenticate_user("Test", "nope").unwrap());

    let ws = store.workspace("Test", &script_id).unwrap();
    let stats = ws.statistics().unwrap();
    assert_eq!(stats.total_scenes, 4);
    assert_eq!(stats.unique_characters, 3);
    assert_eq!(stats.unique_locations, 4);
    assert!(stats.average_scene_length > 100.0);

    let with_mike = ws.scenes_by_character("Rodriguez").unwrap();
    let titles: Vec<&str> = with_mike.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Meeting the Detective", "The Chase"]);

    assert_eq!(ws.search_scenes("senator").unwrap().len(), 1);
    assert_eq!(ws.search_characters("JOURNALIST").unwrap()[0].name, "Sarah Chen");
    assert_eq!(ws.search_locations("shadows").unwrap()[0].name, "Dark Alley");
    assert_eq!(
        ws.location_names().unwrap(),
        vec!["City News Office", "Police Station", "Senate Building", "Dark Alley"]
    );
}

#[test]
fn workspace_edits_are_persisted_in_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let script_id = {
        let mut store = UserStore::open(dir.path()).unwrap();
        store.register_user("ana", "pw", "").unwrap();
        let script_id = store.create_script("ana", "Draft", "first draft").unwrap();
        let mut ws = store.workspace("ana", &script_id).unwrap();
        ws.add_scene(Scene::new(3, "Late", "Roof")).unwrap();
        ws.add_scene(Scene::new(1, "Early", "Bed")).unwrap();
        ws.add_character(Character::new("Sam").age(30)).unwrap();
        ws.add_location(Location::new("Roof", "Windy").location_type("Outdoor"))
            .unwrap();
        script_id
    };

    let raw = std::fs::read_to_string(dir.path().join("scripts.json")).unwrap();
    let late = raw.find("\"Late\"").unwrap();
    let early = raw.find("\"Early\"").unwrap();
    assert!(late < early);
    assert!(raw.contains("\"type\": \"Outdoor\""));

    let mut store = UserStore::open(dir.path()).unwrap();
    let ws = store.workspace("ana", &script_id).unwrap();
    let sequence: Vec<String> = ws.scene_sequence().unwrap().into_iter().map(|s| s.title).collect();
    assert_eq!(sequence, vec!["Late", "Early"]);
    assert_eq!(ws.characters().unwrap().get("1").unwrap().age.as_deref(), Some("30"));
}

#[test]
fn legacy_scene_fields_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("scripts.json"),
        r#"{"ana":[{"id":"ana_1_1","name":"Old","scenes":{
            "1":{"scene_number":"7","setting":"Garage","characters":"Sam, Lee ,",
                 "notes":[{"text":"first","timestamp":"x"},{"text":"second","timestamp":"y"}]}
        }}]}"#,
    )
    .unwrap();

    let store = UserStore::open(dir.path()).unwrap();
    let scene = store
        .get_script("ana", "ana_1_1")
        .unwrap()
        .scenes
        .get("1")
        .unwrap();
    assert_eq!(scene.scene_number, Some(7));
    assert_eq!(scene.place(), "Garage");
    assert_eq!(scene.characters, vec!["Sam", "Lee"]);
    assert_eq!(scene.notes_text().as_deref(), Some("first\nsecond"));
    assert_eq!(scene.notes[1].timestamp.as_deref(), Some("y"));
}

#[test]
fn other_users_scripts_survive_a_write_after_loading_legacy_shapes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("scripts.json"),
        r#"{"ana":[{"id":"ana_1_1","name":"Rooftops","characters":null,
            "locations":{"1":{"name":"Roof","objects":"desk, chair","type":"Outdoor"}},
            "scenes":{"1":{"title":"Ledge","tone_mood":"tense","beats":[{"text":"wind","timestamp":"t"}]}}}]}"#,
    )
    .unwrap();

    let mut store = UserStore::open(dir.path()).unwrap();
    assert_eq!(store.user_scripts("ana").len(), 1);
    let roof = store.get_script("ana", "ana_1_1").unwrap().locations.get("1").unwrap();
    assert_eq!(roof.objects, vec!["desk", "chair"]);

    store.create_script("bob", "Bob's draft", "").unwrap();

    let reopened = UserStore::open(dir.path()).unwrap();
    let ana = reopened.get_script("ana", "ana_1_1").unwrap();
    assert_eq!(ana.name, "Rooftops");
    assert_eq!(ana.locations.get("1").unwrap().objects, vec!["desk", "chair"]);
    assert_eq!(ana.scenes.get("1").unwrap().beats[0].timestamp.as_deref(), Some("t"));
    assert_eq!(reopened.user_scripts("bob").len(), 1);
}

#[test]
fn chat_context_reflects_script_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = UserStore::open(dir.path()).unwrap();
    let script_id = store.seed_sample_data().unwrap();
    let script = store.get_script("Test", &script_id).unwrap().clone();

    let mut chat = ChatStore::open(dir.path()).unwrap();
    chat.add_message("Test", Some(&script_id), "user", "Who is Sarah?")
        .unwrap();
    chat.add_message("Test", Some(&script_id), "assistant", "A journalist.")
        .unwrap();

    let summary = ChatStore::context_summary(&script);
    assert!(summary.starts_with("Characters: Sarah Chen, Detective Mike Rodriguez, Senator James Whitmore | Scenes: Scene 1: The Tip"));

    let context = chat.full_context(&script, "Test");
    assert!(context.contains("- Scene 4: The Chase at Dark Alley\n"));
    assert!(context.contains("RECENT CHAT HISTORY:\n- User: Who is Sarah?...\n- Assistant: A journalist....\n"));
}
