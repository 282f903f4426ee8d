//! ONNX Runtime backend for scikit-learn exports.
//!
//! skl2onnx names a classifier's outputs `output_label` and
//! `output_probability`. The probability output must be a plain
//! `[1, 2]` float tensor, i.e. exported with `zipmap=False`.

#[cfg(feature = "onnx")]
use std::sync::Mutex;

#[cfg(feature = "onnx")]
use ort::session::Session;

#[cfg(feature = "onnx")]
use super::{Classifier, ClassifierError, FEATURE_COUNT};

/// Probability output name used by skl2onnx.
#[cfg_attr(not(feature = "onnx"), allow(dead_code))]
pub const PROBABILITY_OUTPUT: &str = "output_probability";

/// Pick the probability output: by name first, else by position.
///
/// skl2onnx emits `[label, probability]`, so the second output is used
/// when there are two or more; a single-output model is taken as-is.
#[cfg_attr(not(feature = "onnx"), allow(dead_code))]
fn select_probability_output<'a, T: ?Sized>(
    by_name: Option<&'a T>,
    output_count: usize,
    by_index: impl FnOnce(usize) -> &'a T,
) -> Option<&'a T> {
    if by_name.is_some() {
        return by_name;
    }
    match output_count {
        0 => None,
        1 => Some(by_index(0)),
        _ => Some(by_index(1)),
    }
}

/// Classifier running an ONNX export through ONNX Runtime.
///
/// Expects a single float input of shape `[1, 8]`.
/// `Session::run` takes `&mut self`, hence the Mutex.
#[cfg(feature = "onnx")]
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

#[cfg(feature = "onnx")]
impl OnnxClassifier {
    pub fn from_memory(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .with_intra_threads(1)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .commit_from_memory(bytes)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(format!("ONNX load failed: {e}")))?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

#[cfg(feature = "onnx")]
impl Classifier for OnnxClassifier {
    fn predict_probability(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], ClassifierError> {
        use ort::value::TensorRef;

        let input: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let array = ndarray::Array2::from_shape_vec((1, FEATURE_COUNT), input)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let tensor = TensorRef::from_array_view(&array)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::Inference("Session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

        let probabilities = select_probability_output(
            outputs.get(PROBABILITY_OUTPUT),
            outputs.len(),
            |i| &outputs[i],
        )
        .ok_or_else(|| ClassifierError::Inference("model has no outputs".into()))?;

        let (shape, data) = probabilities
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Output extraction: {e}")))?;

        if data.len() != 2 {
            return Err(ClassifierError::Inference(format!(
                "Unexpected output shape: {shape:?}, expected [1, 2]"
            )));
        }

        Ok([f64::from(data[0]), f64::from(data[1])])
    }

    fn kind(&self) -> String {
        "onnx".into()
    }
}
