use serde::{Deserialize, Serialize};

pub const MIB: u64 = 1024 * 1024;

/// Size and quality rules applied to photos before upload.
///
/// Thresholds are in bytes of the selected file, qualities are JPEG
/// qualities in `1..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoPolicy {
    /// Largest payload the backend accepts; bigger files are recompressed
    pub max_upload_bytes: u64,
    pub max_dimension: u32,
    /// Longest side used for files above `large_photo_bytes`
    pub large_max_dimension: u32,
    pub large_photo_bytes: u64,
    pub moderate_photo_bytes: u64,
    pub default_quality: u8,
    pub moderate_quality: u8,
    pub aggressive_quality: u8,
    /// Quality of the second pass when the first one misses the budget
    pub retry_quality: u8,
    /// Target size of a single compression pass
    pub pass_budget_bytes: u64,
}

impl Default for PhotoPolicy {
    fn default() -> Self {
        Self {
            max_upload_bytes: 5 * MIB,
            max_dimension: 1920,
            large_max_dimension: 1280,
            large_photo_bytes: 8 * MIB,
            moderate_photo_bytes: 3 * MIB,
            default_quality: 85,
            moderate_quality: 70,
            aggressive_quality: 60,
            retry_quality: 50,
            pass_budget_bytes: 9 * MIB / 2,
        }
    }
}

impl PhotoPolicy {
    pub fn needs_compression(&self, file_size: u64) -> bool {
        file_size > self.max_upload_bytes
    }

    /// Big files take a while to decode; the widget shows a placeholder first
    pub fn shows_optimizing_preview(&self, file_size: u64) -> bool {
        file_size > self.moderate_photo_bytes
    }
}

/// Inputs of one `compress_image` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionPlan {
    pub max_dimension: u32,
    /// Qualities tried in order until a pass fits `size_budget`
    pub quality_steps: Vec<u8>,
    pub size_budget: u64,
}

impl CompressionPlan {
    pub fn new(max_dimension: u32, quality_steps: Vec<u8>, size_budget: u64) -> Self {
        Self {
            max_dimension,
            quality_steps,
            size_budget,
        }
    }

    /// Bigger originals get a smaller canvas and a lower starting quality.
    pub fn for_file_size(policy: &PhotoPolicy, file_size: u64) -> Self {
        let (max_dimension, first_quality) = if file_size > policy.large_photo_bytes {
            (policy.large_max_dimension, policy.aggressive_quality)
        } else if file_size > policy.moderate_photo_bytes {
            (policy.max_dimension, policy.moderate_quality)
        } else {
            (policy.max_dimension, policy.default_quality)
        };

        let mut quality_steps = vec![first_quality];
        if first_quality > policy.retry_quality {
            quality_steps.push(policy.retry_quality);
        }

        Self::new(max_dimension, quality_steps, policy.pass_budget_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_files_start_at_default_quality() {
        let policy = PhotoPolicy::default();
        let plan = CompressionPlan::for_file_size(&policy, 2 * MIB);
        assert_eq!(plan.max_dimension, 1920);
        assert_eq!(plan.quality_steps, vec![85, 50]);
        assert_eq!(plan.size_budget, 4_718_592);
    }

    #[test]
    fn moderate_files_start_at_seventy() {
        let policy = PhotoPolicy::default();
        let plan = CompressionPlan::for_file_size(&policy, 6 * MIB);
        assert_eq!(plan.max_dimension, 1920);
        assert_eq!(plan.quality_steps, vec![70, 50]);
    }

    #[test]
    fn large_files_shrink_canvas_and_quality() {
        let policy = PhotoPolicy::default();
        let plan = CompressionPlan::for_file_size(&policy, 8 * MIB + 1);
        assert_eq!(plan.max_dimension, 1280);
        assert_eq!(plan.quality_steps, vec![60, 50]);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let policy = PhotoPolicy::default();
        assert_eq!(
            CompressionPlan::for_file_size(&policy, 8 * MIB).max_dimension,
            1920
        );
        assert!(!policy.needs_compression(5 * MIB));
        assert!(policy.needs_compression(5 * MIB + 1));
        assert!(!policy.shows_optimizing_preview(3 * MIB));
        assert!(policy.shows_optimizing_preview(3 * MIB + 1));
    }

    #[test]
    fn no_retry_when_first_quality_is_already_at_floor() {
        let policy = PhotoPolicy {
            default_quality: 50,
            ..PhotoPolicy::default()
        };
        let plan = CompressionPlan::for_file_size(&policy, MIB);
        assert_eq!(plan.quality_steps, vec![50]);
    }
}
