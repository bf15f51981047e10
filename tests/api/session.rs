use std::time::Duration;

use fishbowl::config::GameSettings;
use futures_util::StreamExt;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

use crate::helpers::test_app::TestApp;
use crate::helpers::test_client::{Outcome, TeamSetup, WsMessageIn};

#[tokio::test]
async fn new_session_starts_in_setup() {
    let app = TestApp::spawn_app().await;

    let client = app.connect_client().await;

    drop(client);
}

#[tokio::test]
async fn setting_up_teams_prompts_the_first_player_for_words() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;

    let state = client.setup_default_teams().await.unwrap();

    assert_eq!(state.phase, "wordEntry");
    assert_eq!(state.teams.len(), 2);
    let word_entry = state.word_entry.unwrap();
    assert_eq!(word_entry.player_name, "Ann");
    assert_eq!(word_entry.team_name, "Red");
    assert_eq!(word_entry.ordinal, 1);
    assert_eq!(word_entry.total_players, 4);
    assert_eq!(word_entry.min_words, 3);
    assert_eq!(word_entry.max_words, 5);
}

#[tokio::test]
async fn teams_of_different_sizes_are_rejected() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;

    let result = client
        .setup_teams(vec![
            TeamSetup::new("Red", &["Ann", "Bob", "Eve"]),
            TeamSetup::new("Blue", &["Cat", "Dan"]),
        ])
        .await;

    assert_eq!(result, Err("UNEQUAL_TEAM_SIZES".to_string()));
}

#[tokio::test]
async fn too_many_words_are_rejected_and_the_player_can_try_again() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;
    let _ = client.setup_default_teams().await.unwrap();

    let result = client
        .submit_words(&["one", "two", "three", "four", "five", "six"])
        .await;
    assert_eq!(result, Err("TOO_MANY_WORDS".to_string()));

    let state = client.submit_words(&["one", "two", "three"]).await.unwrap();
    assert_eq!(state.word_entry.unwrap().player_name, "Cat");
}

#[tokio::test]
async fn repeated_words_are_rejected() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;
    let _ = client.setup_default_teams().await.unwrap();

    let result = client.submit_words(&["one", "two", "One"]).await;

    assert_eq!(result, Err("REPEATED_WORDS".to_string()));
}

#[tokio::test]
async fn starting_a_turn_before_word_entry_is_rejected() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;

    let result = client.start_turn().await;

    assert_eq!(result, Err("INVALID_PHASE".to_string()));
}

#[tokio::test]
async fn malformed_messages_keep_the_connection_open() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;

    client
        .send_raw_message(Message::Text("{\"type\":\"dance\"}".to_string()))
        .await;
    assert_eq!(
        client.receive_game_state().await,
        Err("UNPROCESSABLE_MESSAGE".to_string())
    );

    let state = client.setup_default_teams().await.unwrap();
    assert_eq!(state.phase, "wordEntry");
}

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;

    client.send_raw_message(Message::Text("ping".to_string())).await;

    let reply = client.rx.next().await.unwrap().unwrap();
    assert_eq!(reply.to_text().unwrap(), "pong");
}

#[tokio::test]
async fn a_turn_shows_words_and_scores_guesses() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;
    let state = client.reach_gameplay().await;

    let round = state.round();
    assert_eq!(round.number, 1);
    assert_eq!(round.name, "Describe It");
    assert_eq!(round.turn_state, "awaitingTurnStart");
    assert_eq!(round.current_player_name, "Ann");
    assert_eq!(round.words_remaining, 12);

    let state = client.start_turn().await.unwrap();
    let round = state.round();
    assert_eq!(round.turn_state, "turnActive");
    assert_eq!(round.time_remaining, 60);
    assert!(!round.time_running_low);
    assert!(round.current_word.is_some());

    let state = client.got_it().await.unwrap();
    assert_eq!(state.teams[0].score, 1);
    assert_eq!(state.teams[1].score, 0);
    assert_eq!(state.round().words_remaining, 11);

    let state = client.skip().await.unwrap();
    assert_eq!(state.teams[0].score, 1);
    assert_eq!(state.round().words_remaining, 11);
    assert!(state.round().current_word.is_some());
}

#[tokio::test]
async fn guessing_every_word_ends_the_turn_early() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;
    let _ = client.reach_gameplay().await;
    let _ = client.start_turn().await.unwrap();

    let mut state = None;
    for _ in 0..12 {
        state = Some(client.got_it().await.unwrap());
    }
    let state = state.unwrap();

    assert_eq!(state.round().turn_state, "turnExpired");
    assert_eq!(state.round().current_word, None);
    assert_eq!(state.teams[0].score, 12);
    assert_eq!(client.got_it().await, Err("INVALID_TURN_STATE".to_string()));
}

#[tokio::test]
async fn the_countdown_ends_the_turn_and_passes_it_to_the_other_team() {
    let app = TestApp::spawn_app_with_game_settings(GameSettings {
        turn_duration_seconds: 1,
        tick_interval_millis: 50,
    })
    .await;
    let mut client = app.connect_client().await;
    let _ = client.reach_gameplay().await;

    let state = client.start_turn().await.unwrap();
    assert_eq!(state.round().time_remaining, 1);
    assert!(state.round().time_running_low);

    let state = timeout(Duration::from_secs(2), client.receive_game_state())
        .await
        .expect("The countdown never expired")
        .unwrap();
    assert_eq!(state.round().turn_state, "turnExpired");
    assert_eq!(state.round().time_remaining, 0);

    let state = client.next_turn().await.unwrap();
    let round = state.round();
    assert_eq!(round.turn_state, "awaitingTurnStart");
    assert_eq!(round.current_team_index, 1);
    assert_eq!(round.current_player_name, "Cat");
}

#[tokio::test]
async fn a_full_game_ends_with_a_winner() {
    let app = TestApp::spawn_app().await;
    let mut client = app.connect_client().await;
    let _ = client.reach_gameplay().await;

    for round_number in 1..=2 {
        let state = client.start_turn().await.unwrap();
        assert_eq!(state.round().number, round_number);
        for _ in 0..12 {
            let _ = client.got_it().await.unwrap();
        }
        let state = client.next_turn().await.unwrap();
        assert_eq!(state.round().current_team_index, 1);

        // The pool is empty, so the next turn closes the round
        let state = client.start_turn().await.unwrap();
        if round_number == 1 {
            assert_eq!(state.phase, "roundResults");
            assert_eq!(state.teams[0].round_scores, vec![12]);
            assert_eq!(state.teams[0].score, 0);
            let state = client.continue_to_next_round().await.unwrap();
            assert_eq!(state.phase, "gameplay");
            assert_eq!(state.round().name, "One Word");
            assert_eq!(state.round().words_remaining, 12);
        } else {
            assert_eq!(state.phase, "finalResults");
            assert_eq!(state.teams[0].round_scores, vec![12, 12]);
            assert_eq!(state.teams[0].total_score, 24);
            assert_eq!(state.teams[1].total_score, 0);
            assert_eq!(
                state.outcome,
                Some(Outcome::Winner {
                    team_index: 0,
                    name: "Red".to_string()
                })
            );
        }
    }
}

#[tokio::test]
async fn a_silent_client_is_disconnected_while_the_countdown_runs() {
    let app = TestApp::spawn_app_with_game_settings(GameSettings {
        turn_duration_seconds: 60,
        tick_interval_millis: 100,
    })
    .await;
    let mut client = app.connect_client().await;
    let _ = client.reach_gameplay().await;
    let _ = client.start_turn().await.unwrap();

    // The ping timeout is 2 seconds, ticks keep arriving but the client says nothing
    let mut states_received = 0;
    let mut error_code = None;
    let closed = timeout(Duration::from_secs(5), async {
        loop {
            match client.rx.next().await {
                Some(Ok(Message::Text(text))) => match serde_json::from_str(&text) {
                    Ok(WsMessageIn::GameState(_)) => states_received += 1,
                    Ok(WsMessageIn::Error { code, .. }) => error_code = Some(code),
                    Err(error) => panic!("Could not parse the message. Error: '{error}'."),
                },
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            }
        }
    })
    .await;

    assert!(closed.is_ok(), "The connection stayed open without pings");
    assert!(states_received > 0);
    assert_eq!(error_code, Some("WEBSOCKET_CLOSED".to_string()));
}
