use super::ExtractionUseCase;
use crate::domain::error::Result;

impl ExtractionUseCase {
    pub(in crate::application::use_cases::extraction) fn parse_text(
        &self,
        bytes: &[u8],
    ) -> Result<String> {
        // UTF-8 first, then a Windows-1252 pass for legacy exports
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Ok(text.to_string());
        }

        let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
        if !had_errors {
            return Ok(decoded.into_owned());
        }

        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::logbuf::new_buffer;
    use crate::domain::document::{DocumentFormat, RequirementDocument};

    #[test]
    fn test_windows_1252_fallback() {
        let logs = new_buffer();
        // "résumé" in Windows-1252 (0xE9 = é), invalid as UTF-8
        let bytes = vec![0x72, 0xE9, 0x73, 0x75, 0x6D, 0xE9];
        let doc = RequirementDocument::new("legacy.txt", DocumentFormat::Txt, bytes);
        let text = ExtractionUseCase::new().extract(&doc, &logs).unwrap();
        assert_eq!(text, "résumé");
    }
}
