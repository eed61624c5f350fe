//! Adapter behaviour against scripted service responses

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use fanyi_client::{FetchError, Fetcher, Signer};
use fanyi_config::Config;
use fanyi_core::dictionary::DictionaryAdapter;
use fanyi_core::language::{DeinflectError, Deinflector};
use fanyi_lang_english::OxfordDictionary;
use fanyi_types::DictionaryOptions;
use serde_json::{Value, json};

const BASE: &str = "http://fanyi.test/";
const HOMEPAGE: &str = "token: 'tok123', ... window.gtk = '320305.131321201';";

#[derive(Default)]
struct ScriptedFetcher {
    homepage: Option<String>,
    /// Bodies per query, served in order; the last one repeats
    bodies: HashMap<String, Vec<String>>,
    delays: HashMap<String, u64>,
    homepage_calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn new() -> Self {
        Self {
            homepage: Some(HOMEPAGE.to_string()),
            ..Default::default()
        }
    }

    fn respond(mut self, query: &str, body: Value) -> Self {
        self.bodies
            .entry(query.to_string())
            .or_default()
            .push(body.to_string());
        self
    }

    fn respond_raw(mut self, query: &str, body: &str) -> Self {
        self.bodies
            .entry(query.to_string())
            .or_default()
            .push(body.to_string());
        self
    }

    fn delay(mut self, query: &str, millis: u64) -> Self {
        self.delays.insert(query.to_string(), millis);
        self
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

fn query_param(url: &str) -> Option<String> {
    let start = url.find("query=")? + "query=".len();
    let raw = url[start..].split('&').next()?;
    Some(urlencoding::decode(raw).ok()?.into_owned())
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url == BASE {
            self.homepage_calls.fetch_add(1, Ordering::SeqCst);
            return self.homepage.clone().ok_or(FetchError::Status {
                status: 503,
                url: url.to_string(),
            });
        }

        assert!(url.contains("sign=sig:"), "unsigned request: {url}");
        assert!(url.contains("token=tok123"), "missing token: {url}");

        let query = query_param(url).expect("lookup url has a query");
        let served = {
            let mut queries = self.queries.lock().unwrap();
            let served = queries.iter().filter(|q| **q == query).count();
            queries.push(query.clone());
            served
        };

        if let Some(millis) = self.delays.get(&query) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        match self.bodies.get(&query) {
            Some(bodies) => Ok(bodies[served.min(bodies.len() - 1)].clone()),
            None => Err(FetchError::RateLimitExceeded),
        }
    }
}

struct TestSigner;

impl Signer for TestSigner {
    fn sign(&self, query: &str, signing_key: &str) -> Option<String> {
        if query == "unsignable" {
            return None;
        }
        Some(format!("sig:{}:{}", query.len(), signing_key.len()))
    }
}

struct StaticDeinflector(Result<Vec<&'static str>, &'static str>);

#[async_trait]
impl Deinflector for StaticDeinflector {
    async fn deinflect(&self, _word: &str) -> Result<Vec<String>, DeinflectError> {
        match &self.0 {
            Ok(bases) => Ok(bases.iter().map(|b| b.to_string()).collect()),
            Err(e) => Err(DeinflectError::Unavailable(e.to_string())),
        }
    }
}

fn config(session_refreshes: u32) -> Config {
    let mut config = Config::default();
    config.network.base_url = BASE.to_string();
    config.dictionary.session_refreshes = session_refreshes;
    config
}

fn dictionary(
    fetcher: Arc<ScriptedFetcher>,
    bases: Result<Vec<&'static str>, &'static str>,
) -> OxfordDictionary {
    OxfordDictionary::new(
        &config(1),
        fetcher,
        Arc::new(TestSigner),
        Arc::new(StaticDeinflector(bases)),
    )
}

fn oxford_response(headword: &str, examples: &[&str]) -> Value {
    let examples: Vec<Value> = examples
        .iter()
        .map(|e| json!({"tag": "x", "enText": e}))
        .collect();
    let mut sense = vec![json!({"tag": "d", "text": format!("{headword} sense")})];
    sense.extend(examples);

    json!({
        "dict_result": {
            "simple_means": {
                "word_name": headword,
                "symbols": [{"ph_en": "uk", "ph_am": "us", "parts": [{"part": "v.", "means": ["跑"]}]}]
            },
            "oxford": {"entry": [{"data": [
                {"tag": "p-g", "data": [
                    {"tag": "p", "p_text": "verb"},
                    {"tag": "d", "enText": format!("{headword} definition")},
                    {"tag": "n-g", "data": sense}
                ]}
            ]}]}
        },
        "trans_result": {"data": [{"src": headword, "dst": "跑"}]}
    })
}

fn translation_response(src: &str, dst: &str) -> Value {
    json!({"dict_result": [], "trans_result": {"data": [{"src": src, "dst": dst}]}})
}

#[tokio::test]
async fn test_records_follow_candidate_order() {
    // The surface form answers last but still comes first
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .respond("running", oxford_response("running", &[]))
            .respond("run", oxford_response("run", &[]))
            .delay("running", 50),
    );
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec!["run"]));

    let records = dict.find_term("running").await;

    let headwords: Vec<&str> = records.iter().map(|r| r.headword.as_str()).collect();
    assert_eq!(headwords, vec!["running", "run"]);
    for record in &records {
        assert_eq!(record.pronunciation, "uk[uk] us[us]");
        assert_eq!(record.definition_blocks.len(), 2);
        assert_eq!(record.audio_links.len(), 2);
    }
}

#[tokio::test]
async fn test_session_acquired_once_for_all_candidates() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .respond("went", translation_response("went", "去"))
            .respond("go", oxford_response("go", &[])),
    );
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec!["go"]));

    assert_eq!(dict.find_term("went").await.len(), 2);
    assert_eq!(dict.find_term("went").await.len(), 2);
    assert_eq!(fetcher.homepage_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_candidate_does_not_abort_siblings() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .respond_raw("better", "<html>not json</html>")
            .respond("well", oxford_response("well", &[])),
    );
    // "good" has no scripted body, so its fetch fails
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec!["good", "well"]));

    let records = dict.find_term("better").await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].headword, "well");
    assert_eq!(fetcher.queries().len(), 3);
}

#[tokio::test]
async fn test_deinflection_failure_queries_word_only() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond("run", oxford_response("run", &[])));
    let dict = dictionary(Arc::clone(&fetcher), Err("offline"));

    let records = dict.find_term("run").await;

    assert_eq!(records.len(), 1);
    assert_eq!(fetcher.queries(), vec!["run"]);
}

#[tokio::test]
async fn test_duplicate_candidates_are_each_queried() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond("run", oxford_response("run", &[])));
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec!["run"]));

    let records = dict.find_term("run").await;

    assert_eq!(records.len(), 2);
    assert_eq!(fetcher.queries(), vec!["run", "run"]);
}

#[tokio::test]
async fn test_homepage_without_token_yields_nothing() {
    let fetcher = Arc::new(ScriptedFetcher {
        homepage: Some("<html>maintenance</html>".to_string()),
        ..ScriptedFetcher::new().respond("run", oxford_response("run", &[]))
    });
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec![]));

    assert!(dict.find_term("run").await.is_empty());
    assert!(fetcher.queries().is_empty());
}

#[tokio::test]
async fn test_homepage_outage_yields_nothing() {
    let fetcher = Arc::new(ScriptedFetcher {
        homepage: None,
        ..ScriptedFetcher::new()
    });
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec!["go"]));

    assert!(dict.find_term("went").await.is_empty());
    // Failed acquisitions are not cached, so each candidate tried once
    assert_eq!(fetcher.homepage_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unsignable_query_yields_nothing() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond("run", oxford_response("run", &[])));
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec!["unsignable", "run"]));

    let records = dict.find_term("unsignable").await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].headword, "run");
}

#[tokio::test]
async fn test_rejection_refreshes_session_once() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .respond("run", json!({"errno": 997, "errmsg": "token expired"}))
            .respond("run", oxford_response("run", &[])),
    );
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec![]));

    let records = dict.find_term("run").await;

    assert_eq!(records.len(), 1);
    assert_eq!(fetcher.homepage_calls.load(Ordering::SeqCst), 2);
    assert_eq!(fetcher.queries(), vec!["run", "run"]);
}

#[tokio::test]
async fn test_rejection_without_refreshes_fails_fast() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .respond("run", json!({"errno": 997}))
            .respond("run", oxford_response("run", &[])),
    );
    let dict = OxfordDictionary::new(
        &config(0),
        Arc::clone(&fetcher) as Arc<dyn Fetcher>,
        Arc::new(TestSigner),
        Arc::new(StaticDeinflector(Ok(vec![]))),
    );

    assert!(dict.find_term("run").await.is_empty());
    assert_eq!(fetcher.homepage_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_set_options_caps_examples() {
    let examples = ["Run!", "I run.", "They run.", "We ran."];
    let fetcher = Arc::new(ScriptedFetcher::new().respond("run", oxford_response("run", &examples)));
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec![]));

    let records = dict.find_term("run").await;
    let sense = &records[0].definition_blocks[1];
    assert_eq!(sense.matches("<li class=\"sent\">").count(), 2);
    assert!(sense.contains("<b>Run</b>!"));

    dict.set_options(DictionaryOptions { maxexample: Some(3) });
    let records = dict.find_term("run").await;
    let sense = &records[0].definition_blocks[1];
    assert_eq!(sense.matches("<li class=\"sent\">").count(), 3);
    assert!(sense.contains("They <b>run</b>."));

    dict.set_options(DictionaryOptions { maxexample: None });
    assert_eq!(dict.max_example(), 2);
}

#[tokio::test]
async fn test_blank_word_does_nothing() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec!["x"]));

    assert!(dict.find_term("  \n").await.is_empty());
    assert_eq!(fetcher.homepage_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_phrase_falls_back_to_translation() {
    let fetcher = Arc::new(
        ScriptedFetcher::new().respond("look it up", translation_response("look it up", "查一下")),
    );
    let dict = dictionary(Arc::clone(&fetcher), Ok(vec![]));

    let records = dict.find_term(" look it up ").await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].definition_blocks, vec!["查一下"]);
    assert!(records[0].audio_links.is_empty());
    assert!(records[0].pronunciation.is_empty());
}

#[tokio::test]
async fn test_display_name() {
    let dict = dictionary(Arc::new(ScriptedFetcher::new()), Ok(vec![]));
    assert_eq!(dict.display_name(), "Oxford EN->EN Dictionary");
}
