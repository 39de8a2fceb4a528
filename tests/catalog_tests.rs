//! JSON catalogs driving a full session.

use timeloop_ccg::cards::{
    Card, CardCatalog, CardId, Character, CharacterCatalog, CharacterType, ObstacleCard, ObstacleCatalog, ObstacleId,
    ObstacleType, SkillTag, Stat, StatBlock,
};
use timeloop_ccg::core::{CatalogError, GameConfig, PlayerId};
use timeloop_ccg::rules::{score_regular, Contribution, ObstacleDeckBuilder, Play};
use timeloop_ccg::timeloop::{LoopGameBuilder, LoopPhase, PlayerSetup};
use timeloop_ccg::GameRng;

const CARDS: &str = r#"{
    "crowbar":  {"name": "Crowbar", "description": "Leverage", "stat": "strength",
                 "compatibleTypes": ["barrier", "personnel"]},
    "hack":     {"name": "Hack", "description": "Override the lock", "stat": "TECH",
                 "compatibleTypes": ["barrier", "environment"]},
    "dash":     {"name": "Dash", "description": "Get through fast", "stat": "speed"},
    "respirator": {"name": "Respirator", "description": "Breathe", "stat": "tech",
                 "compatibleTypes": ["hazard", "environment"]}
}"#;

const STARTERS: &str = r#"{
    "engineer": {"cards": ["hack", "hack", "respirator", "dash", "crowbar", "hack"]},
    "runner":   {"cards": ["dash", "dash", "dash", "crowbar", "respirator"]}
}"#;

const CHARACTERS: &str = r#"{
    "engineer": {"name": "Engineer", "strength": 2, "speed": 3, "tech": 7, "health": 8,
                 "description": "Knows the station"},
    "runner":   {"name": "Runner", "strength": 3, "speed": 7, "tech": 2, "health": 9,
                 "description": "Never stops"}
}"#;

const OBSTACLES: &str = r#"{
    "airlock":  {"name": "Jammed Airlock", "description": "", "difficulty": 6,
                 "requiredSkills": ["tech", "Strength"], "type": "barrier"},
    "fire":     {"name": "Corridor Fire", "description": "", "difficulty": 8,
                 "requiredSkills": ["speed", "charisma"], "type": "hazard"},
    "guard":    {"name": "Security Drone", "description": "", "difficulty": 5,
                 "requiredSkills": ["speed"], "type": "personnel"},
    "vacuum":   {"name": "Hull Breach", "description": "", "difficulty": 9,
                 "requiredSkills": ["tech"], "type": "environment"},
    "reactor":  {"name": "Reactor Meltdown", "description": "", "difficulty": 0,
                 "requiredSkills": [], "type": "finale",
                 "environmentRequired": 6, "hazardRequired": 4}
}"#;

const CONFIG: &str = r#"{"obstacles": {"deck_size": 4, "shuffle": false}}"#;

fn builder() -> LoopGameBuilder {
    LoopGameBuilder::new(
        CardCatalog::from_json(CARDS, STARTERS).unwrap(),
        ObstacleCatalog::from_json(OBSTACLES).unwrap(),
        CharacterCatalog::from_json(CHARACTERS).unwrap(),
    )
    .config(GameConfig::from_json(CONFIG).unwrap())
}

#[test]
fn test_obstacle_catalog_parsing() {
    let catalog = ObstacleCatalog::from_json(OBSTACLES).unwrap();

    assert_eq!(catalog.len(), 5);
    let fire = catalog.get(&ObstacleId::new("fire")).unwrap();
    assert_eq!(fire.obstacle_type, ObstacleType::Hazard);
    assert_eq!(
        fire.required_skills.as_slice(),
        &[SkillTag::from(Stat::Speed), SkillTag::new("charisma")]
    );

    let reactor = catalog.finale().unwrap();
    assert!(reactor.is_finale());
    assert_eq!(reactor.finale_requirements.environment, 6);
    assert_eq!(reactor.finale_requirements.hazard, 4);
    assert_eq!(reactor.finale_requirements.barrier, 5);
    assert_eq!(catalog.regular().count(), 4);
}

#[test]
fn test_unrecognized_card_stat_scores_base_against_strength_obstacle() {
    let cards = CardCatalog::from_json(r#"{"odd": {"name": "Odd", "stat": "luck"}}"#, "{}").unwrap();
    let odd: &Card = cards.get(&CardId::new("odd")).unwrap();
    let brute = Character::new("brute", "Brute", StatBlock::new(9, 1, 1), 10);
    let plays = [Play { player: PlayerId::new(0), card: Some(odd), character: &brute }];

    let door = ObstacleCard::new("door", "Door", 10, ObstacleType::Barrier).with_required(&[Stat::Strength]);
    let score = score_regular(&door, &plays);
    assert_eq!(score.contributions[0].1, Contribution::Base);
    assert_eq!(score.total, 1);

    // A catalog obstacle naming the same unknown skill matches it at strength value.
    let obstacles = ObstacleCatalog::from_json(
        r#"{"wheel": {"name": "Wheel", "difficulty": 10, "requiredSkills": ["LUCK"], "type": "barrier"}}"#,
    )
    .unwrap();
    let wheel = obstacles.get(&ObstacleId::new("wheel")).unwrap();
    let score = score_regular(wheel, &plays);
    assert_eq!(score.contributions[0].1, Contribution::Matched { stat: Stat::Strength, value: 9 });
    assert_eq!(score.total, 9);
}

#[test]
fn test_unknown_obstacle_type_is_rejected() {
    let err = ObstacleCatalog::from_json(r#"{"x": {"name": "X", "difficulty": 1, "type": "lava"}}"#).unwrap_err();

    assert!(matches!(err, CatalogError::UnknownObstacleType { ref id, ref tag } if id == "x" && tag == "lava"));
}

#[test]
fn test_malformed_documents() {
    assert!(matches!(CardCatalog::from_json("[", "{}"), Err(CatalogError::Json(_))));
    assert!(matches!(CharacterCatalog::from_json(r#"{"a": {"name": "A"}}"#), Err(CatalogError::Json(_))));
}

#[test]
fn test_character_cycling() {
    let characters = CharacterCatalog::from_json(CHARACTERS).unwrap();
    let engineer = CharacterType::new("engineer");
    let runner = CharacterType::new("runner");

    assert_eq!(characters.next_type(&engineer), Some(&runner));
    assert_eq!(characters.next_type(&runner), Some(&engineer));
    assert_eq!(characters.previous_type(&engineer), Some(&runner));
    assert_eq!(characters.next_type(&CharacterType::new("ghost")), None);
}

#[test]
fn test_unshuffled_sequence_follows_id_order() {
    let obstacles = ObstacleCatalog::from_json(OBSTACLES).unwrap();
    let deck = ObstacleDeckBuilder::new(&obstacles, GameConfig::new(12, false)).build(&mut GameRng::new(0));

    let ids: Vec<&str> = deck.all_cards().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["airlock", "fire", "guard", "vacuum", "reactor"]);
}

#[test]
fn test_session_from_catalogs() {
    let mut game = builder()
        .player(PlayerSetup::new("engineer"))
        .player(PlayerSetup::new("runner"))
        .build(2024)
        .unwrap();

    let view = game.view();
    assert_eq!(view.players[0].pool_size, 6);
    assert_eq!(view.players[1].pool_size, 5);
    assert_eq!(view.players[0].max_health, 8);
    assert_eq!(game.obstacle_deck().all_cards().len(), 4);
    assert!(game.obstacle_deck().all_cards().last().unwrap().is_finale());

    // Both players skip the first obstacle; its whole difficulty becomes damage.
    let difficulty = game.current_obstacle().unwrap().difficulty;
    game.skip_turn(0).unwrap();
    let view = game.skip_turn(1).unwrap();

    let report = view.last_report.as_ref().unwrap();
    assert!(!report.succeeded);
    assert_eq!(report.contributions[0].1, Contribution::Skipped);
    assert_eq!(report.damage_taken.iter().sum::<u32>(), difficulty);
    assert_eq!(view.history.len(), 1);
}

#[test]
fn test_contribution_depends_on_card_and_obstacle() {
    let mut game = builder()
        .config(GameConfig::new(12, false))
        .player(PlayerSetup::new("engineer"))
        .build(3)
        .unwrap();
    assert_eq!(game.current_obstacle().unwrap().name, "Jammed Airlock");

    let played = game.players()[PlayerId::new(0)].deck().hand()[0].clone();
    let view = game.play_card(0, played.entity_id).unwrap();
    let report = view.last_report.unwrap();

    // Airlock: barrier, difficulty 6, needs tech or strength. Engineer: 2/3/7.
    let expected = match played.card.id.as_str() {
        "hack" => Contribution::Matched { stat: Stat::Tech, value: 7 },
        "crowbar" => Contribution::Matched { stat: Stat::Strength, value: 2 },
        "dash" => Contribution::Base,
        "respirator" => Contribution::Incompatible,
        other => panic!("unexpected starter card {other}"),
    };
    assert_eq!(report.contributions[0].1, expected);
    assert_eq!(report.succeeded, expected.value() >= 6);
    assert_eq!(report.rewards.is_empty(), !report.succeeded);
}

#[test]
fn test_view_serializes() {
    let game = builder().player(PlayerSetup::new("runner")).build(8).unwrap();

    let json = game.view().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["loop_number"], 1);
    assert_eq!(value["players"][0]["name"], "Player 1");
    assert_eq!(value["players"][0]["hand"].as_array().unwrap().len(), 3);
    assert!(matches!(game.phase(), LoopPhase::InLoop { loop_number: 1 }));
}

#[test]
fn test_difficulty_filter_applies_to_sessions() {
    let game = builder()
        .config(GameConfig::new(12, true))
        .max_difficulty(6)
        .player(PlayerSetup::new("runner"))
        .build(4)
        .unwrap();

    let ids: Vec<&str> = game.obstacle_deck().all_cards().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids.last(), Some(&"reactor"));
    assert!(!ids.contains(&"fire"));
    assert!(!ids.contains(&"vacuum"));
}
