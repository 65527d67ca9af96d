/*!
 * Heuristic language identification.
 *
 * Each supported language carries a signature: an ordered list of regex rules
 * that either match characters specific to the language's script or
 * diacritics, or its most common function words. A sample is scored by
 * counting weighted matches per language and normalizing by the square root
 * of the sample length. The classifier is pure and holds no state between
 * calls.
 */

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Samples shorter than this (after whitespace normalization) are never classified
pub const MIN_SAMPLE_CHARS: usize = 20;

/// A winning normalized score must exceed this to be reported
pub const SCORE_THRESHOLD: f64 = 0.1;

/// Kind of a detection rule, which determines its weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Script or diacritic characters specific to the language
    CharacterClass,
    /// Common function words of the language
    CommonWord,
}

impl RuleKind {
    /// Weight applied to every match of a rule of this kind
    pub fn weight(self) -> u32 {
        match self {
            RuleKind::CharacterClass => 2,
            RuleKind::CommonWord => 1,
        }
    }
}

/// A single weighted pattern in a language signature
#[derive(Debug, Clone)]
pub struct DetectionRule {
    kind: RuleKind,
    pattern: Regex,
}

impl DetectionRule {
    /// Create a rule from a raw regex pattern
    pub fn new(kind: RuleKind, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Case-insensitive character class rule, e.g. `äöüß`
    pub fn character_class(chars: &str) -> Result<Self, regex::Error> {
        Self::new(RuleKind::CharacterClass, &format!("(?i)[{}]", chars))
    }

    /// Case-insensitive whole-word alternation rule
    pub fn common_words(words: &[&str]) -> Result<Self, regex::Error> {
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Self::new(RuleKind::CommonWord, &format!(r"(?i)\b(?:{})\b", alternation))
    }

    /// Rule kind
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Number of non-overlapping matches multiplied by the rule weight
    pub fn weighted_matches(&self, text: &str) -> u32 {
        self.pattern.find_iter(text).count() as u32 * self.kind.weight()
    }
}

/// A language code together with its detection rules
#[derive(Debug, Clone)]
pub struct LanguageSignature {
    code: String,
    rules: Vec<DetectionRule>,
}

impl LanguageSignature {
    pub fn new(code: impl Into<String>, rules: Vec<DetectionRule>) -> Self {
        Self {
            code: code.into(),
            rules,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rules(&self) -> &[DetectionRule] {
        &self.rules
    }

    /// Sum of weighted matches over all rules
    pub fn raw_score(&self, text: &str) -> u32 {
        self.rules.iter().map(|r| r.weighted_matches(text)).sum()
    }
}

/// Outcome of classifying a sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A confidently detected language code
    Language(String),
    /// Too short, too weak or ambiguous
    Unknown,
}

impl Detection {
    /// Detected code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Detection::Language(code) => Some(code),
            Detection::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Detection::Unknown)
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detection::Language(code) => write!(f, "{}", code),
            Detection::Unknown => write!(f, "unknown"),
        }
    }
}

/// Score of one language for one sample
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageScore {
    /// Language code
    pub code: String,
    /// Weighted match count
    pub raw: u32,
    /// Raw count divided by the square root of the sample length
    pub score: f64,
}

/// Full diagnostic result of a classification
#[derive(Debug, Clone)]
pub struct DetectionReport {
    /// The final decision
    pub detection: Detection,
    /// Scores per language, in signature order; empty for short samples
    pub scores: Vec<LanguageScore>,
    /// Codes sharing the top score when more than one language tied
    pub tied: Vec<String>,
}

static DEFAULT_SIGNATURES: Lazy<Vec<LanguageSignature>> = Lazy::new(|| {
    let sig = |code: &str, chars: Option<&str>, words: &[&str]| {
        let mut rules = Vec::new();
        if let Some(chars) = chars {
            rules.push(DetectionRule::character_class(chars).expect("Invalid character class"));
        }
        if !words.is_empty() {
            rules.push(DetectionRule::common_words(words).expect("Invalid word list"));
        }
        LanguageSignature::new(code, rules)
    };
    let script = |code: &str, classes: &[&str]| {
        let rules = classes
            .iter()
            .map(|c| DetectionRule::new(RuleKind::CharacterClass, c).expect("Invalid script class"))
            .collect();
        LanguageSignature::new(code, rules)
    };

    vec![
        sig("deu_Latn", Some("äöüß"), &[
            "und", "der", "die", "das", "ist", "ich", "du", "wir", "sie", "nicht", "ein", "eine",
            "zu", "von", "mit", "den", "dem", "des", "im", "für", "auf", "es", "sich", "auch",
            "wenn", "wird", "sind", "oder", "hat", "als", "an", "bei", "nach", "so", "nur", "vor",
            "über", "aber", "aus", "wie", "kann", "noch", "zum", "mehr",
        ]),
        sig("eng_Latn", None, &[
            "the", "of", "and", "to", "in", "is", "you", "that", "it", "for", "was", "on", "are",
            "with", "as", "be", "this", "have", "from", "or", "had", "by", "not", "but", "what",
            "all", "were", "we", "when", "your", "can", "said", "there", "use", "an", "each",
            "which", "she", "do", "how", "their", "if", "will", "up", "about", "out", "them",
        ]),
        sig("nld_Latn", Some("ĳáéíóúëïöü"), &[
            "de", "het", "een", "en", "van", "in", "is", "dat", "op", "te", "voor", "met", "zijn",
            "uit", "die", "niet", "aan", "er", "om", "deze", "ook", "als", "door", "maar", "naar",
            "heeft", "bij", "of", "nog", "over", "tot", "je", "mij", "hij", "wordt", "we", "kan",
            "dan", "wat", "was", "ze", "geen", "zo",
        ]),
        sig("swe_Latn", Some("åäö"), &[
            "och", "att", "det", "som", "en", "på", "är", "av", "för", "med", "den", "till",
            "inte", "har", "de", "ett", "jag", "om", "var", "vi", "så", "men", "sig", "från",
            "eller", "du", "när", "kan", "hur", "ska", "vad", "där", "nu", "över", "skulle",
            "mycket", "också",
        ]),
        sig("spa_Latn", Some("áéíóúñ¿¡"), &[
            "el", "la", "los", "las", "de", "en", "y", "que", "es", "por", "con", "para", "un",
            "una", "no", "lo", "del", "se", "como", "más", "su", "al", "pero", "si", "o", "ha",
            "me", "este", "ya", "te", "le", "mi", "está", "entre", "cuando", "muy", "todo", "sin",
            "sobre", "hasta", "algo", "tiene", "son",
        ]),
        sig("fra_Latn", Some("àâçéèêëîïôùûüÿ"), &[
            "le", "la", "les", "de", "et", "est", "en", "un", "une", "du", "des", "ce", "cette",
            "ces", "je", "tu", "il", "nous", "vous", "ils", "que", "qui", "dans", "par", "pour",
            "sur", "avec", "pas", "au", "aux", "plus", "mais", "ou", "sont", "comme", "elle",
            "tout", "on", "même", "aussi", "bien", "été", "avoir", "fait",
        ]),
        sig("ita_Latn", Some("àèéìíîòóùú"), &[
            "il", "lo", "la", "i", "gli", "le", "un", "uno", "una", "di", "a", "da", "in", "con",
            "su", "per", "tra", "fra", "che", "non", "è", "sono", "come", "ma", "se", "anche",
            "si", "al", "della", "del", "dei", "degli", "delle", "nella", "nel", "ha", "ho",
            "questo", "questa", "questi", "queste", "più", "suo", "sua", "loro",
        ]),
        sig("por_Latn", Some("áàâãçéêíóôõú"), &[
            "o", "a", "os", "as", "de", "da", "do", "das", "dos", "um", "uma", "e", "que", "em",
            "para", "com", "não", "se", "na", "no", "nos", "nas", "por", "mais", "como", "mas",
            "ou", "ao", "pelo", "pela", "são", "só", "isto", "isso", "ele", "ela", "eles", "elas",
            "você", "este", "esta",
        ]),
        sig("pol_Latn", Some("ąćęłńóśźż"), &[
            "w", "i", "na", "się", "z", "do", "to", "że", "nie", "jest", "o", "a", "jak", "dla",
            "po", "co", "tak", "ale", "być", "przez", "od", "już", "go", "tylko", "jego", "ma",
            "czy", "jej", "ten", "mnie", "był", "nim", "kiedy", "pan", "ich", "bardzo", "może",
            "tu", "jestem", "są", "was", "mi", "ty", "teraz", "będzie",
        ]),
        sig("rus_Cyrl", Some("абвгдеёжзийклмнопрстуфхцчшщъыьэюя"), &[
            "и", "в", "не", "на", "я", "что", "с", "он", "а", "то", "это", "как", "по", "но",
            "его", "за", "от", "она", "у", "из", "к", "мы", "вы", "они", "бы", "же", "был", "так",
            "для", "все", "только", "меня", "есть", "вот", "если", "нет", "один",
        ]),
        sig("ukr_Cyrl", Some("іїєґ"), &[
            "і", "в", "не", "на", "я", "що", "з", "він", "а", "це", "як", "по", "але", "його",
            "за", "від", "вона", "у", "із", "до", "ми", "ви", "вони", "був", "так", "для", "все",
            "тільки", "мене", "є", "тут", "бути", "якщо", "ні", "один",
        ]),
        script("jpn_Jpan", &[r"[\x{3040}-\x{309F}\x{30A0}-\x{30FF}]", r"[\x{4E00}-\x{9FAF}]"]),
        script("cmn_Hans", &[r"[\x{4E00}-\x{9FFF}]", r"[\x{3400}-\x{4DBF}]"]),
        script("kor_Hang", &[r"[\x{AC00}-\x{D7A3}\x{1100}-\x{11FF}\x{3130}-\x{318F}]"]),
        script("ara_Arab", &[r"[\x{0600}-\x{06FF}]", r"[\x{0750}-\x{077F}\x{08A0}-\x{08FF}]"]),
        script("hin_Deva", &[r"[\x{0900}-\x{097F}]", r"[\x{0901}\x{0902}\x{0903}]"]),
        sig(
            "vie_Latn",
            Some("áàảãạâấầẩẫậăắằẳẵặéèẻẽẹêếềểễệíìỉĩịóòỏõọôốồổỗộơớờởỡợúùủũụưứừửữựýỳỷỹỵđ"),
            &[
                "và", "của", "có", "là", "không", "được", "trong", "một", "cho", "về", "với", "tôi",
                "đã", "người", "này", "những", "để", "từ", "các", "như", "khi", "ra", "thì", "đó",
                "nó", "vào", "sẽ", "phải", "còn", "bị", "bởi",
            ],
        ),
        sig("tur_Latn", Some("çğıöşü"), &[
            "bir", "ve", "bu", "de", "için", "da", "ne", "ben", "o", "ki", "ile", "mi", "ama",
            "gibi", "kadar", "daha", "çok", "en", "sonra", "her", "var", "diye", "bana", "seni",
            "beni", "onu", "şey", "değil", "ya", "yok",
        ]),
    ]
});

static DEFAULT_CLASSIFIER: Lazy<LanguageClassifier> =
    Lazy::new(|| LanguageClassifier::with_signatures(DEFAULT_SIGNATURES.clone()));

/// Scores samples against a set of language signatures
#[derive(Debug, Clone)]
pub struct LanguageClassifier {
    signatures: Vec<LanguageSignature>,
    min_chars: usize,
    threshold: f64,
}

impl Default for LanguageClassifier {
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

impl LanguageClassifier {
    /// Classifier over a custom signature table, in priority order
    pub fn with_signatures(signatures: Vec<LanguageSignature>) -> Self {
        Self {
            signatures,
            min_chars: MIN_SAMPLE_CHARS,
            threshold: SCORE_THRESHOLD,
        }
    }

    /// Registered signatures
    pub fn signatures(&self) -> &[LanguageSignature] {
        &self.signatures
    }

    /// Collapse whitespace runs to single spaces and trim
    pub fn normalize(sample: &str) -> String {
        sample.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Per-language scores for a sample; empty when the sample is too short
    pub fn scores(&self, sample: &str) -> Vec<LanguageScore> {
        let text = Self::normalize(sample);
        let len = text.chars().count();
        if len < self.min_chars {
            return Vec::new();
        }

        let divisor = (len as f64).sqrt();
        self.signatures
            .iter()
            .map(|sig| {
                let raw = sig.raw_score(&text);
                LanguageScore {
                    code: sig.code.clone(),
                    raw,
                    score: raw as f64 / divisor,
                }
            })
            .collect()
    }

    /// Classify a sample and keep the full score table
    pub fn report(&self, sample: &str) -> DetectionReport {
        let scores = self.scores(sample);

        // Every score shares the divisor, so ties are compared on raw counts
        let best_raw = scores.iter().map(|s| s.raw).max().unwrap_or(0);
        let leaders: Vec<&LanguageScore> = if best_raw == 0 {
            Vec::new()
        } else {
            scores.iter().filter(|s| s.raw == best_raw).collect()
        };

        debug!(
            "Language detection scores: {}",
            scores
                .iter()
                .filter(|s| s.raw > 0)
                .map(|s| format!("{}={:.3}", s.code, s.score))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let (detection, tied) = match leaders.as_slice() {
            [] => (Detection::Unknown, Vec::new()),
            [winner] if winner.score > self.threshold => {
                (Detection::Language(winner.code.clone()), Vec::new())
            }
            [_] => (Detection::Unknown, Vec::new()),
            many => {
                let tied: Vec<String> = many.iter().map(|s| s.code.clone()).collect();
                debug!("Ambiguous detection, top score shared by {}", tied.join(", "));
                (Detection::Unknown, tied)
            }
        };

        DetectionReport {
            detection,
            scores,
            tied,
        }
    }

    /// Best-guess language of a sample
    pub fn classify(&self, sample: &str) -> Detection {
        self.report(sample).detection
    }
}

/// Classify a sample with the built-in signatures
pub fn detect_language(sample: &str) -> Detection {
    DEFAULT_CLASSIFIER.classify(sample)
}
