use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::domain::{CandidateIdentity, MovFile};

const MIB: u64 = 1024 * 1024;

/// Limits applied to the consolidated MOV upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    pub max_bytes: u64,
}

impl AttachmentPolicy {
    pub fn from_megabytes(megabytes: u64) -> Self {
        Self {
            max_bytes: megabytes.saturating_mul(MIB),
        }
    }
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self::from_megabytes(15)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("only PDF files are accepted, got {0}")]
    NotPdf(String),
    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("attachment data is not valid base64")]
    InvalidEncoding,
}

/// Validate raw upload bytes and encode them for transport.
pub fn encode_attachment(
    name: &str,
    mime_type: &str,
    bytes: &[u8],
    policy: &AttachmentPolicy,
) -> Result<MovFile, AttachmentError> {
    ensure_pdf(mime_type)?;
    ensure_size(bytes.len() as u64, policy)?;

    Ok(MovFile {
        name: name.to_string(),
        data: STANDARD.encode(bytes),
        mime_type: mime::APPLICATION_PDF.essence_str().to_string(),
    })
}

/// Re-check an already encoded attachment, e.g. one posted with a record.
pub fn validate_attachment(
    file: &MovFile,
    policy: &AttachmentPolicy,
) -> Result<(), AttachmentError> {
    ensure_pdf(&file.mime_type)?;
    let decoded = STANDARD
        .decode(file.data.as_bytes())
        .map_err(|_| AttachmentError::InvalidEncoding)?;
    ensure_size(decoded.len() as u64, policy)
}

fn ensure_pdf(mime_type: &str) -> Result<(), AttachmentError> {
    let is_pdf = mime_type
        .trim()
        .parse::<mime::Mime>()
        .map(|parsed| parsed.essence_str() == mime::APPLICATION_PDF.essence_str())
        .unwrap_or(false);

    if is_pdf {
        Ok(())
    } else {
        Err(AttachmentError::NotPdf(mime_type.to_string()))
    }
}

fn ensure_size(size: u64, policy: &AttachmentPolicy) -> Result<(), AttachmentError> {
    if size > policy.max_bytes {
        return Err(AttachmentError::TooLarge {
            size,
            limit: policy.max_bytes,
        });
    }
    Ok(())
}

/// `<Division>_<School>_<Candidate>.pdf`, keeping only ASCII letters, digits
/// and underscores.
pub fn normalized_file_name(identity: &CandidateIdentity) -> String {
    let division = identity
        .division
        .map(|division| sanitize_component(division.label()))
        .filter(|part| !part.is_empty())
        .unwrap_or_else(|| "Unassigned".to_string());
    let school = sanitize_component(&identity.school_name);
    let candidate = sanitize_component(&identity.candidate_name);

    format!("{division}_{school}_{candidate}.pdf")
}

fn sanitize_component(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::nomination::domain::Division;

    #[test]
    fn file_name_strips_punctuation_and_joins_words() {
        let identity = CandidateIdentity {
            candidate_name: "Ma. Clara  De la Cruz".to_string(),
            school_name: "St. Mary's Academy".to_string(),
            division: Some(Division::TaguigPateros),
        };

        assert_eq!(
            normalized_file_name(&identity),
            "Taguig_City_and_Pateros_TAPAT_St_Marys_Academy_Ma_Clara_De_la_Cruz.pdf"
        );
    }

    #[test]
    fn file_name_drops_non_ascii_letters() {
        let identity = CandidateIdentity {
            candidate_name: "Niño".to_string(),
            school_name: "Pasay NHS".to_string(),
            division: Some(Division::LasPinas),
        };

        assert_eq!(normalized_file_name(&identity), "Las_Pias_Pasay_NHS_Nio.pdf");
    }

    #[test]
    fn rejects_non_pdf_uploads() {
        let err = encode_attachment("photo.png", "image/png", b"png", &AttachmentPolicy::default())
            .expect_err("png rejected");

        assert_eq!(err, AttachmentError::NotPdf("image/png".to_string()));
    }

    #[test]
    fn rejects_files_over_the_ceiling() {
        let policy = AttachmentPolicy { max_bytes: 4 };
        let err = encode_attachment("mov.pdf", "application/pdf", b"%PDF-1", &policy)
            .expect_err("oversized file rejected");

        assert_eq!(err, AttachmentError::TooLarge { size: 6, limit: 4 });
    }

    #[test]
    fn encodes_pdf_bytes_as_base64() {
        let file = encode_attachment(
            "mov.pdf",
            "application/pdf",
            b"%PDF-1.7",
            &AttachmentPolicy::default(),
        )
        .expect("pdf accepted");

        assert_eq!(file.data, "JVBERi0xLjc=");
        assert_eq!(file.mime_type, "application/pdf");
        assert!(validate_attachment(&file, &AttachmentPolicy::default()).is_ok());
    }

    #[test]
    fn validation_rejects_corrupt_payloads() {
        let file = MovFile {
            name: "mov.pdf".to_string(),
            data: "not base64!".to_string(),
            mime_type: "application/pdf".to_string(),
        };

        assert_eq!(
            validate_attachment(&file, &AttachmentPolicy::default()),
            Err(AttachmentError::InvalidEncoding)
        );
    }

    #[test]
    fn default_ceiling_is_fifteen_megabytes() {
        assert_eq!(AttachmentPolicy::default().max_bytes, 15 * 1024 * 1024);
    }
}
