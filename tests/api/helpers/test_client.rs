use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestClient {
    pub tx: SplitSink<Socket, Message>,
    pub rx: SplitStream<Socket>,
}

impl TestClient {
    pub fn new(websocket: Socket) -> Self {
        let (tx, rx) = websocket.split();
        TestClient { tx, rx }
    }

    /// Returns the next game state, or the error code sent instead.
    pub async fn receive_game_state(&mut self) -> Result<GameState, String> {
        match self.rx.next().await {
            Some(Ok(message)) => {
                match serde_json::from_str(message.to_text().expect("Message was not a text")) {
                    Ok(WsMessageIn::GameState(state)) => Ok(state),
                    Ok(WsMessageIn::Error {
                        code,
                        title,
                        detail,
                    }) => {
                        assert!(!title.is_empty());
                        assert!(!detail.is_empty());
                        Err(code)
                    }
                    Err(error) => Err(format!("Could not parse the message. Error: '{error}'.")),
                }
            }
            Some(Err(error)) => Err(format!("Websocket returned an error {error}")),
            None => Err("Websocket closed before expected.".to_string()),
        }
    }

    pub async fn setup_teams(&mut self, teams: Vec<TeamSetup>) -> Result<GameState, String> {
        self.send(WsMessageOut::SetupTeams { teams }).await
    }

    pub async fn setup_default_teams(&mut self) -> Result<GameState, String> {
        self.setup_teams(vec![
            TeamSetup::new("Red", &["Ann", "Bob"]),
            TeamSetup::new("Blue", &["Cat", "Dan"]),
        ])
        .await
    }

    pub async fn submit_words(&mut self, words: &[&str]) -> Result<GameState, String> {
        self.send(WsMessageOut::SubmitWords {
            words: words.iter().map(|word| word.to_string()).collect(),
        })
        .await
    }

    /// Sets up two teams of two and submits three distinct words per player.
    pub async fn reach_gameplay(&mut self) -> GameState {
        let state = self.setup_default_teams().await.unwrap();
        assert_eq!(state.phase, "wordEntry");

        let mut state = state;
        for player in 0..4 {
            let words: Vec<String> = (0..3).map(|word| format!("word{player}{word}")).collect();
            let words: Vec<&str> = words.iter().map(String::as_str).collect();
            state = self.submit_words(&words).await.unwrap();
        }
        assert_eq!(state.phase, "gameplay");
        state
    }

    pub async fn start_turn(&mut self) -> Result<GameState, String> {
        self.send(WsMessageOut::StartTurn).await
    }

    pub async fn got_it(&mut self) -> Result<GameState, String> {
        self.send(WsMessageOut::GotIt).await
    }

    pub async fn skip(&mut self) -> Result<GameState, String> {
        self.send(WsMessageOut::Skip).await
    }

    pub async fn next_turn(&mut self) -> Result<GameState, String> {
        self.send(WsMessageOut::NextTurn).await
    }

    pub async fn continue_to_next_round(&mut self) -> Result<GameState, String> {
        self.send(WsMessageOut::ContinueToNextRound).await
    }

    pub async fn send_raw_message(&mut self, message: Message) {
        self.tx.send(message).await.expect("Could not send message");
    }

    async fn send(&mut self, message: WsMessageOut) -> Result<GameState, String> {
        self.send_raw_message(Message::Text(
            serde_json::to_string(&message).expect("Could not serialize message"),
        ))
        .await;
        self.receive_game_state().await
    }
}

#[derive(Serialize)]
pub struct TeamSetup {
    pub name: String,
    pub players: Vec<String>,
}

impl TeamSetup {
    pub fn new(name: &str, players: &[&str]) -> Self {
        TeamSetup {
            name: name.to_string(),
            players: players.iter().map(|player| player.to_string()).collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: String,
    pub teams: Vec<Team>,
    pub word_entry: Option<WordEntry>,
    pub round: Option<Round>,
    pub outcome: Option<Outcome>,
}

impl GameState {
    pub fn round(&self) -> Round {
        self.round.clone().expect("The state has no round")
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub players: Vec<String>,
    pub score: u32,
    pub round_scores: Vec<u32>,
    pub total_score: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub player_name: String,
    pub team_name: String,
    pub ordinal: usize,
    pub total_players: usize,
    pub min_words: usize,
    pub max_words: usize,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub number: u8,
    pub name: String,
    pub turn_state: String,
    pub current_team_index: usize,
    pub current_player_name: String,
    pub time_remaining: u32,
    pub time_running_low: bool,
    pub current_word: Option<String>,
    pub words_remaining: usize,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Outcome {
    #[serde(rename_all = "camelCase")]
    Winner { team_index: usize, name: String },
    Tie,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageIn {
    Error {
        code: String,
        title: String,
        detail: String,
    },
    GameState(GameState),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageOut {
    SetupTeams { teams: Vec<TeamSetup> },
    SubmitWords { words: Vec<String> },
    StartTurn,
    GotIt,
    Skip,
    NextTurn,
    ContinueToNextRound,
}
