// Batch driver: optional normalization followed by extraction
//
// Every document is processed on its own. An invalid document is logged,
// counted as skipped, and never aborts the rest of the batch.

use crate::config::Config;
use crate::error::Result;
use crate::extractor::{HardwareInfo, HardwareProfile};
use crate::normalizer::LshwNormalizer;
use crate::patterns::{ExtractorRules, NormalizerRules, PatternRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;

/// Result of processing one capture
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedCapture {
    pub name: String,
    /// Normalized capture, when normalization ran
    pub normalized: Option<Map<String, Value>>,
    pub profile: HardwareProfile,
}

/// Counters for a processed batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub documents: usize,
    pub normalized: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub processing_time_ms: u64,
}

impl BatchStats {
    fn from_results(documents: usize, results: &[ProcessedCapture], start: Instant) -> Self {
        Self {
            documents,
            normalized: results.iter().filter(|r| r.normalized.is_some()).count(),
            extracted: results.len(),
            skipped: documents - results.len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Normalizer and extractor sharing one set of classification tables
#[derive(Debug, Clone)]
pub struct ProfilePipeline {
    normalizer: LshwNormalizer,
    registry: Arc<PatternRegistry>,
    normalize_first: bool,
}

impl ProfilePipeline {
    /// Build the pipeline from a loaded configuration
    pub fn new(config: &Config) -> Result<Self> {
        Self::from_rules(
            &config.normalizer,
            &config.extractor,
            config.output.normalize_first,
        )
    }

    /// Build the pipeline from classification tables
    pub fn from_rules(
        normalizer: &NormalizerRules,
        extractor: &ExtractorRules,
        normalize_first: bool,
    ) -> Result<Self> {
        Ok(Self {
            normalizer: LshwNormalizer::from_rules(normalizer),
            registry: Arc::new(PatternRegistry::from_rules(extractor)?),
            normalize_first,
        })
    }

    pub fn normalizer(&self) -> &LshwNormalizer {
        &self.normalizer
    }

    pub fn registry(&self) -> Arc<PatternRegistry> {
        Arc::clone(&self.registry)
    }

    /// Process one capture, returning `None` when it has to be skipped
    pub fn process(&self, name: &str, capture: &Value) -> Option<ProcessedCapture> {
        let normalized = if self.normalize_first {
            let normalized = self.normalizer.normalize(name, capture);
            if normalized.is_empty() {
                return None;
            }
            Some(normalized)
        } else {
            None
        };

        let profile = match &normalized {
            Some(map) => self.extract(name, &Value::Object(map.clone()))?,
            None => self.extract(name, capture)?,
        };

        Some(ProcessedCapture {
            name: name.to_string(),
            normalized,
            profile,
        })
    }

    fn extract(&self, name: &str, capture: &Value) -> Option<HardwareProfile> {
        match HardwareInfo::with_registry(name, capture, self.registry()) {
            Ok(info) => Some(info.parse()),
            Err(e) => {
                tracing::error!("Error normalizing {}: {}", name, e);
                None
            }
        }
    }

    /// Process documents sequentially, in input order
    pub fn process_batch(&self, documents: &[(String, Value)]) -> (Vec<ProcessedCapture>, BatchStats) {
        let start = Instant::now();

        let results: Vec<ProcessedCapture> = documents
            .iter()
            .filter_map(|(name, capture)| self.process(name, capture))
            .collect();

        let stats = BatchStats::from_results(documents.len(), &results, start);
        tracing::info!(
            "Processed {} captures: {} extracted, {} skipped in {}ms",
            stats.documents,
            stats.extracted,
            stats.skipped,
            stats.processing_time_ms
        );

        (results, stats)
    }

    /// Process documents over `workers` scoped threads
    ///
    /// Output order matches input order regardless of scheduling.
    pub fn process_batch_parallel(
        &self,
        documents: &[(String, Value)],
        workers: usize,
    ) -> (Vec<ProcessedCapture>, BatchStats) {
        if workers <= 1 || documents.len() <= 1 {
            return self.process_batch(documents);
        }

        let start = Instant::now();
        let chunk_size = documents.len().div_ceil(workers);

        let results: Vec<ProcessedCapture> = std::thread::scope(|scope| {
            let handles: Vec<_> = documents
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .filter_map(|(name, capture)| self.process(name, capture))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(chunk) => chunk,
                    Err(_) => {
                        tracing::error!("Worker thread panicked, its captures are skipped");
                        Vec::new()
                    }
                })
                .collect()
        });

        let stats = BatchStats::from_results(documents.len(), &results, start);
        tracing::info!(
            "Processed {} captures on {} workers: {} extracted, {} skipped in {}ms",
            stats.documents,
            workers,
            stats.extracted,
            stats.skipped,
            stats.processing_time_ms
        );

        (results, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pipeline(normalize_first: bool) -> ProfilePipeline {
        ProfilePipeline::from_rules(
            &NormalizerRules::default(),
            &ExtractorRules::default(),
            normalize_first,
        )
        .unwrap()
    }

    fn doc(node: &str, cores: &str) -> Value {
        json!({
            "hardware": {
                "node": node,
                "data": {
                    "id": "root", "class": "system",
                    "children": [{
                        "id": "cpu:0", "class": "processor",
                        "configuration": {"cores": cores, "threads": "2"}
                    }]
                }
            }
        })
    }

    #[test]
    fn test_process_normalizes_then_extracts() {
        let result = pipeline(true).process("a.json", &doc("a", "4")).unwrap();
        assert_eq!(result.name, "a.json");
        assert_eq!(result.profile.node, "a");
        assert_eq!(result.profile.cpu.cpu_total_cores, 4);

        let normalized = result.normalized.unwrap();
        assert_eq!(normalized["hardware"]["error"], json!(""));
    }

    #[test]
    fn test_process_without_normalization() {
        let result = pipeline(false).process("a.json", &doc("a", "4")).unwrap();
        assert!(result.normalized.is_none());
        assert_eq!(result.profile.cpu.cpu_total_cores, 4);
    }

    #[test]
    fn test_invalid_documents_are_skipped() {
        let p = pipeline(true);
        assert!(p.process("bad", &json!({"foo": 1})).is_none());
        // passes wrapper check but fails lshw validation
        assert!(p.process("bad", &json!({"hardware": {"data": {}}})).is_none());

        // without normalization only the wrapper is checked
        assert!(pipeline(false)
            .process("ok", &json!({"hardware": {"data": {}}}))
            .is_some());
    }

    #[test]
    fn test_batch_counts_skips() {
        let docs = vec![
            ("a".to_string(), doc("a", "4")),
            ("bad".to_string(), json!({"nothing": true})),
            ("b".to_string(), doc("b", "8")),
        ];
        let (results, stats) = pipeline(true).process_batch(&docs);

        assert_eq!(results.len(), 2);
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.normalized, 2);
        assert_eq!(stats.extracted, 2);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_parallel_preserves_order() {
        let docs: Vec<(String, Value)> = (0..17)
            .map(|i| (format!("doc-{}", i), doc(&format!("node-{}", i), &i.to_string())))
            .collect();
        let p = pipeline(true);

        let (sequential, _) = p.process_batch(&docs);
        let (parallel, stats) = p.process_batch_parallel(&docs, 4);

        assert_eq!(stats.extracted, 17);
        assert_eq!(sequential, parallel);
        let names: Vec<&str> = parallel.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names[0], "doc-0");
        assert_eq!(names[16], "doc-16");
    }

    #[test]
    fn test_parallel_batch_survives_oversized_counts() {
        let mut oversized = doc("d1", "18446744073709551615");
        oversized["hardware"]["data"]["children"]
            .as_array_mut()
            .unwrap()
            .push(json!({"id": "cpu:1", "class": "processor", "configuration": {"cores": "1"}}));
        let docs = vec![
            ("d0".to_string(), doc("d0", "4")),
            ("d1".to_string(), oversized),
            ("d2".to_string(), doc("d2", "8")),
            ("d3".to_string(), doc("d3", "16")),
        ];

        let (results, stats) = pipeline(true).process_batch_parallel(&docs, 2);
        assert_eq!(stats.extracted, 4);
        assert_eq!(stats.skipped, 0);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["d0", "d1", "d2", "d3"]);
        assert_eq!(results[1].profile.cpu.cpu_total_cores, u64::MAX);
    }
}
