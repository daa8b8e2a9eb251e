/// names of option values used in interactions
pub mod value {
    pub const QUESTION: &str = "question";
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
    pub const LANGUAGE: &str = "language";
    pub const TEXT: &str = "text";
    pub const SOURCE_LANGUAGE: &str = "source_language";
    pub const TARGET_LANGUAGE: &str = "target_language";
}

/// fixed dispatcher-level reply texts
pub mod reply {
    pub const COMMAND_NOT_FOUND: &str = "Comando não encontrado.";
    pub const GENERIC_COMMAND_ERROR: &str = "Ocorreu um erro ao executar este comando.";
    pub const TEXT_TOO_LONG: &str = "O texto deve ter no máximo 200 caracteres.";
}
