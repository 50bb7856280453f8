use crate::corpus::load_corpus;
use crate::engine::{Letters, LettersError};
use crate::errors::LoadError;
use crate::ladder::source::parse_ladder_json;
use crate::ladder::LadderSearch;
use crate::log::init_logger;
use crate::word_list::{FrequencyList, WordList};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(Serialize)]
struct WasmError {
    /// Error code (e.g., "L002", "Q001")
    code: String,
    message: String,
    description: String,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<LoadError> for WasmError {
    fn from(e: LoadError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<LettersError> for WasmError {
    fn from(e: LettersError) -> Self {
        // report the underlying load failure rather than the wrapper
        match e {
            LettersError::Load(le) => WasmError::from(le),
            _ => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);
        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }
        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }
        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(e: serde_wasm_bindgen::Error) -> JsValue {
    WasmError {
        code: "WASM001".to_string(),
        message: format!("serialization failed: {e}"),
        description: "Failed to convert a value between Rust and JavaScript".to_string(),
        details: "A query result or argument could not be converted.".to_string(),
        help: Some("Check that search filters are passed as a plain object".to_string()),
    }
    .into()
}

fn to_js<T: Serialize>(value: Result<T, LettersError>) -> Result<JsValue, JsValue> {
    let value = value.map_err(WasmError::from)?;
    to_value(&value).map_err(serialization_error)
}

/// Set up the panic hook and console logging.
///
/// Must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("letters WASM module initialized");
}

/// Browser handle over a [`Letters`] instance. Corpus text is fetched by the page
/// and handed over as strings.
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmLetters {
    inner: Letters,
}

#[wasm_bindgen]
impl WasmLetters {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLetters {
        WasmLetters::default()
    }

    /// Load a plain one-word-per-line dictionary.
    #[wasm_bindgen(js_name = loadDictionary)]
    pub fn load_dictionary(&mut self, name: &str, text: &str) -> usize {
        let index = load_corpus(name, &WordList::parse_from_str(text), None);
        let size = index.size();
        self.inner = std::mem::take(&mut self.inner).with_dictionary(index);
        size
    }

    /// Load a `word frequency` list, optionally keeping only the first `limit` words.
    #[wasm_bindgen(js_name = loadFrequencies)]
    pub fn load_frequencies(&mut self, text: &str, limit: Option<usize>) -> usize {
        let mut frequencies = FrequencyList::parse_from_str(text);
        if let Some(limit) = limit {
            frequencies = frequencies.truncated(limit);
        }
        let index = load_corpus("common", &WordList::default(), Some(&frequencies));
        let size = index.size();
        self.inner = std::mem::take(&mut self.inner).with_frequency_corpus(index);
        size
    }

    /// Load one ladder JSON document. Difficulties are filled in whenever `loadFrequencies` runs.
    #[wasm_bindgen(js_name = loadLadders)]
    pub fn load_ladders(&mut self, json: &str) -> Result<usize, JsValue> {
        let records = parse_ladder_json(json, "ladders").map_err(WasmError::from)?;
        let pairs = records.len();
        self.inner = std::mem::take(&mut self.inner).with_ladders(records);
        Ok(pairs)
    }

    pub fn validate(&self, word: &str) -> Result<JsValue, JsValue> {
        to_js(self.inner.validate(word))
    }

    pub fn anagrams(&self, word: &str) -> Result<JsValue, JsValue> {
        to_js(self.inner.anagrams(word))
    }

    #[wasm_bindgen(js_name = subAnagrams)]
    pub fn sub_anagrams(&self, word: &str, best_only: bool) -> Result<JsValue, JsValue> {
        to_js(self.inner.sub_anagrams(word, best_only))
    }

    pub fn conundrums(&self, length: usize) -> Result<JsValue, JsValue> {
        to_js(self.inner.conundrums(length))
    }

    #[wasm_bindgen(js_name = randomConundrum)]
    pub fn random_conundrum(&self, length: usize) -> Result<JsValue, JsValue> {
        to_js(self.inner.random_conundrum(length, &mut rand::thread_rng()))
    }

    pub fn words(&self, length: usize) -> Result<JsValue, JsValue> {
        to_js(self.inner.words(length))
    }

    pub fn scores(&self, length: usize) -> Result<JsValue, JsValue> {
        to_js(self.inner.word_scores(length))
    }

    pub fn ladder(&self, pair: &str) -> Result<JsValue, JsValue> {
        to_js(self.inner.ladder(pair))
    }

    pub fn ladders(&self, length: usize) -> Result<JsValue, JsValue> {
        to_js(self.inner.ladders(length))
    }

    #[wasm_bindgen(js_name = laddersByClass)]
    pub fn ladders_by_class(&self, class: u32, length: usize) -> Result<JsValue, JsValue> {
        to_js(self.inner.ladders_by_difficulty_class(length, &[class]))
    }

    /// `search` accepts `{ length: number[], difficulty: number[], ladder_filter: string, page_size: number }`.
    pub fn search(&self, search: JsValue) -> Result<JsValue, JsValue> {
        let search: LadderSearch = serde_wasm_bindgen::from_value(search).map_err(serialization_error)?;
        to_js(self.inner.search_ladders(&search))
    }

    #[wasm_bindgen(js_name = randomLadder)]
    pub fn random_ladder(&self, class: u32, length: usize) -> Result<JsValue, JsValue> {
        to_js(self.inner.random_ladder(class, length, &mut rand::thread_rng()))
    }
}
