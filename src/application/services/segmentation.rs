use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::domain::{Answer, AnswerOption, BlockKind, Question, QuestionType, RawBlock};

use super::ImageCatalog;

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s*[.)]").unwrap());
static LATIN_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?[a-dA-D][.)]").unwrap());
static THAI_OPTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(?[กขคง][.)]").unwrap());
static ANY_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?(?:[a-dA-D]|[กขคง])[.)]").unwrap());

/// Letters that may prefix an answer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionAlphabet {
    /// `a` to `d`, either case.
    Latin,
    /// ก ข ค ง
    Thai,
    Both,
}

/// Which non-option lines start a new question once one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionBoundary {
    /// A numbered line, or any line that is not an option.
    NumberedOrUnprefixed,
    /// Only numbered lines; other lines continue the open question or option.
    NumberedOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentationPolicy {
    pub alphabet: OptionAlphabet,
    /// Close a question as soon as it holds this many options.
    pub option_capacity: Option<NonZeroUsize>,
    pub boundary: QuestionBoundary,
}

impl Default for SegmentationPolicy {
    fn default() -> Self {
        Self {
            alphabet: OptionAlphabet::Both,
            option_capacity: None,
            boundary: QuestionBoundary::NumberedOrUnprefixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Option line with no question open.
    OrphanOption,
    /// Image with no free question or option slot to land in.
    UnplacedImage,
    /// Image reference with no matching extracted image.
    MissingImage,
    /// Image already placed earlier in the same document.
    DuplicateImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationAnomaly {
    pub sequence_index: usize,
    pub kind: AnomalyKind,
}

impl fmt::Display for SegmentationAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            AnomalyKind::OrphanOption => "option line before any question was dropped",
            AnomalyKind::UnplacedImage => "image had no question or option to attach to",
            AnomalyKind::MissingImage => "image reference did not match any embedded image",
            AnomalyKind::DuplicateImage => "image was already used by an earlier entry",
        };
        write!(f, "block {}: {}", self.sequence_index, what)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    pub questions: Vec<Question>,
    pub anomalies: Vec<SegmentationAnomaly>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Option,
    Numbered,
    Plain,
}

/// Groups extracted blocks into questions, options and their images.
#[derive(Debug, Clone, Default)]
pub struct SegmentationEngine {
    policy: SegmentationPolicy,
}

impl SegmentationEngine {
    pub fn new(policy: SegmentationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SegmentationPolicy {
        &self.policy
    }

    pub fn segment(&self, blocks: &[RawBlock], images: &ImageCatalog) -> Segmentation {
        let mut run = SegmentationRun {
            policy: &self.policy,
            images,
            open: None,
            questions: Vec::new(),
            anomalies: Vec::new(),
            image_ordinal: 0,
            placed: HashSet::new(),
        };

        for block in blocks {
            match block.kind {
                BlockKind::Text => run.on_text(block),
                BlockKind::Image => run.on_image(block),
            }
        }

        run.finish()
    }

    fn classify(alphabet: OptionAlphabet, line: &str) -> LineClass {
        let option = match alphabet {
            OptionAlphabet::Latin => &LATIN_OPTION,
            OptionAlphabet::Thai => &THAI_OPTION,
            OptionAlphabet::Both => &ANY_OPTION,
        };

        if option.is_match(line) {
            LineClass::Option
        } else if NUMBERED_LINE.is_match(line) {
            LineClass::Numbered
        } else {
            LineClass::Plain
        }
    }
}

struct SegmentationRun<'a> {
    policy: &'a SegmentationPolicy,
    images: &'a ImageCatalog,
    open: Option<Question>,
    questions: Vec<Question>,
    anomalies: Vec<SegmentationAnomaly>,
    image_ordinal: usize,
    placed: HashSet<usize>,
}

impl SegmentationRun<'_> {
    fn on_text(&mut self, block: &RawBlock) {
        let line = block.value.trim();
        if line.is_empty() {
            return;
        }

        let class = SegmentationEngine::classify(self.policy.alphabet, line);

        let Some(question) = self.open.as_mut() else {
            if class == LineClass::Option {
                self.anomaly(block.sequence_index, AnomalyKind::OrphanOption);
            } else {
                self.open_question(line);
            }
            return;
        };

        match (class, self.policy.boundary) {
            (LineClass::Option, _) => {
                question.options.push(AnswerOption::new(line));
                let full = self
                    .policy
                    .option_capacity
                    .is_some_and(|capacity| question.options.len() >= capacity.get());
                if full {
                    self.close_question();
                }
            }
            (LineClass::Numbered, _) | (LineClass::Plain, QuestionBoundary::NumberedOrUnprefixed) => {
                self.close_question();
                self.open_question(line);
            }
            (LineClass::Plain, QuestionBoundary::NumberedOnly) => {
                let target = match question.options.last_mut() {
                    Some(option) => &mut option.text,
                    None => &mut question.text,
                };
                target.push(' ');
                target.push_str(line);
            }
        }
    }

    fn on_image(&mut self, block: &RawBlock) {
        let ordinal = self.image_ordinal;
        self.image_ordinal += 1;

        let Some((index, handle)) = self.images.resolve(&block.value, ordinal) else {
            self.anomaly(block.sequence_index, AnomalyKind::MissingImage);
            return;
        };
        if self.placed.contains(&index) {
            self.anomaly(block.sequence_index, AnomalyKind::DuplicateImage);
            return;
        }

        let slot = match self.open.as_mut() {
            Some(question) => match question.options.last_mut() {
                Some(option) => &mut option.image,
                None => &mut question.image,
            },
            None => {
                self.anomaly(block.sequence_index, AnomalyKind::UnplacedImage);
                return;
            }
        };

        if slot.is_some() {
            self.anomaly(block.sequence_index, AnomalyKind::UnplacedImage);
            return;
        }

        *slot = Some(handle.clone());
        self.placed.insert(index);
    }

    fn open_question(&mut self, line: &str) {
        let local_id = self.questions.len() as u32 + 1;
        self.open = Some(Question::new(local_id, line, QuestionType::Text));
    }

    fn close_question(&mut self) {
        let Some(mut question) = self.open.take() else {
            return;
        };

        question.question_type = if question.options.is_empty() {
            QuestionType::Text
        } else {
            QuestionType::Radio
        };
        question.answer = Answer::empty_for(question.question_type);
        self.questions.push(question);
    }

    fn anomaly(&mut self, sequence_index: usize, kind: AnomalyKind) {
        let anomaly = SegmentationAnomaly {
            sequence_index,
            kind,
        };
        tracing::warn!(sequence_index, kind = ?kind, "{}", anomaly);
        self.anomalies.push(anomaly);
    }

    fn finish(mut self) -> Segmentation {
        self.close_question();
        Segmentation {
            questions: self.questions,
            anomalies: self.anomalies,
        }
    }
}
