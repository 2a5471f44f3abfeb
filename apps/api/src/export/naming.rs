use crate::document::DocumentKind;

/// `"Ada Lovelace"` + `Resume` → `"Ada_Lovelace_Resume.pdf"`.
pub fn artifact_name(person: &str, kind: DocumentKind) -> String {
    let stem = person.trim().replace(' ', "_");
    format!("{stem}_{}.pdf", kind.artifact_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_name() {
        assert_eq!(
            artifact_name("Ada Lovelace", DocumentKind::Resume),
            "Ada_Lovelace_Resume.pdf"
        );
    }

    #[test]
    fn test_every_space_is_replaced() {
        assert_eq!(
            artifact_name("Ada Quinn Lovelace", DocumentKind::CoverLetter),
            "Ada_Quinn_Lovelace_Cover_Letter.pdf"
        );
    }
}
