//! Language identification and built-in language definitions
//!
//! A definition is static data: keyword and identifier sets, comment
//! delimiters and token rules. Regex rules are kept as pattern strings here;
//! each editor compiles its own table (see [`super::tokenizer`]).

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::tokenizer::{tokenize_c_style, NativeTokenizer};
use crate::palette::PaletteIndex;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    #[default]
    None,
    Cpp,
    C,
    Cs,
    Python,
    Lua,
    Json,
    Sql,
    AngelScript,
    Glsl,
    Hlsl,
}

impl LanguageId {
    pub const ALL: [LanguageId; 11] = [
        LanguageId::None,
        LanguageId::Cpp,
        LanguageId::C,
        LanguageId::Cs,
        LanguageId::Python,
        LanguageId::Lua,
        LanguageId::Json,
        LanguageId::Sql,
        LanguageId::AngelScript,
        LanguageId::Glsl,
        LanguageId::Hlsl,
    ];

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" | "inl" => LanguageId::Cpp,
            "c" | "h" => LanguageId::C,
            "cs" => LanguageId::Cs,
            "py" | "pyw" => LanguageId::Python,
            "lua" => LanguageId::Lua,
            "json" => LanguageId::Json,
            "sql" => LanguageId::Sql,
            "as" | "angelscript" => LanguageId::AngelScript,
            "glsl" | "vert" | "frag" | "geom" | "comp" => LanguageId::Glsl,
            "hlsl" | "fx" | "fxh" => LanguageId::Hlsl,
            _ => LanguageId::None,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::None)
    }

    /// Parse a lowercase name as used in configuration
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.config_name().eq_ignore_ascii_case(name))
    }

    pub fn config_name(self) -> &'static str {
        match self {
            LanguageId::None => "none",
            LanguageId::Cpp => "cpp",
            LanguageId::C => "c",
            LanguageId::Cs => "cs",
            LanguageId::Python => "python",
            LanguageId::Lua => "lua",
            LanguageId::Json => "json",
            LanguageId::Sql => "sql",
            LanguageId::AngelScript => "angelscript",
            LanguageId::Glsl => "glsl",
            LanguageId::Hlsl => "hlsl",
        }
    }

    /// Built-in definition; `None` has no definition
    pub fn definition(self) -> Option<&'static LanguageDefinition> {
        static DEFINITIONS: OnceLock<Vec<LanguageDefinition>> = OnceLock::new();
        let defs = DEFINITIONS.get_or_init(|| {
            LanguageId::ALL[1..]
                .iter()
                .map(|&id| LanguageDefinition::builtin(id))
                .collect()
        });
        defs.iter().find(|d| d.id == self)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LanguageId::None => "Plain Text",
            LanguageId::Cpp => "C++",
            LanguageId::C => "C",
            LanguageId::Cs => "C#",
            LanguageId::Python => "Python",
            LanguageId::Lua => "Lua",
            LanguageId::Json => "JSON",
            LanguageId::Sql => "SQL",
            LanguageId::AngelScript => "AngelScript",
            LanguageId::Glsl => "GLSL",
            LanguageId::Hlsl => "HLSL",
        })
    }
}

/// Read-only per-language data
#[derive(Debug)]
pub struct LanguageDefinition {
    pub id: LanguageId,
    pub name: &'static str,
    /// Stored upper-cased when the language is case-insensitive
    pub keywords: HashSet<String>,
    pub identifiers: HashSet<String>,
    pub preproc_identifiers: HashSet<String>,
    /// Empty strings disable the corresponding comment form
    pub comment_start: &'static str,
    pub comment_end: &'static str,
    pub single_line_comment: &'static str,
    /// Character opening a preprocessor directive when it starts a line
    pub preproc_char: Option<u8>,
    pub native_tokenizer: Option<NativeTokenizer>,
    /// Anchored patterns tried in order after the native tokenizer
    pub token_rules: &'static [(&'static str, PaletteIndex)],
    pub case_sensitive: bool,
}

impl LanguageDefinition {
    fn builtin(id: LanguageId) -> Self {
        let c_style = |keywords: &[&str], identifiers: &[&str]| LanguageDefinition {
            id,
            name: "",
            keywords: to_set(keywords, true),
            identifiers: to_set(identifiers, true),
            preproc_identifiers: to_set(C_PREPROC_IDENTIFIERS, true),
            comment_start: "/*",
            comment_end: "*/",
            single_line_comment: "//",
            preproc_char: Some(b'#'),
            native_tokenizer: Some(tokenize_c_style),
            token_rules: &[],
            case_sensitive: true,
        };

        match id {
            LanguageId::Cpp => LanguageDefinition {
                name: "C++",
                ..c_style(CPP_KEYWORDS, CPP_IDENTIFIERS)
            },
            LanguageId::C => LanguageDefinition {
                name: "C",
                ..c_style(C_KEYWORDS, C_IDENTIFIERS)
            },
            LanguageId::Cs => LanguageDefinition {
                name: "C#",
                ..c_style(CS_KEYWORDS, CS_IDENTIFIERS)
            },
            LanguageId::AngelScript => LanguageDefinition {
                name: "AngelScript",
                ..c_style(ANGELSCRIPT_KEYWORDS, ANGELSCRIPT_IDENTIFIERS)
            },
            LanguageId::Glsl => LanguageDefinition {
                name: "GLSL",
                ..c_style(GLSL_KEYWORDS, GLSL_IDENTIFIERS)
            },
            LanguageId::Hlsl => LanguageDefinition {
                name: "HLSL",
                ..c_style(HLSL_KEYWORDS, HLSL_IDENTIFIERS)
            },
            LanguageId::Python => LanguageDefinition {
                id,
                name: "Python",
                keywords: to_set(PYTHON_KEYWORDS, true),
                identifiers: to_set(PYTHON_IDENTIFIERS, true),
                preproc_identifiers: HashSet::new(),
                comment_start: "\"\"\"",
                comment_end: "\"\"\"",
                single_line_comment: "#",
                preproc_char: None,
                native_tokenizer: None,
                token_rules: PYTHON_RULES,
                case_sensitive: true,
            },
            LanguageId::Lua => LanguageDefinition {
                id,
                name: "Lua",
                keywords: to_set(LUA_KEYWORDS, true),
                identifiers: to_set(LUA_IDENTIFIERS, true),
                preproc_identifiers: HashSet::new(),
                comment_start: "--[[",
                comment_end: "]]",
                single_line_comment: "--",
                preproc_char: None,
                native_tokenizer: None,
                token_rules: LUA_RULES,
                case_sensitive: true,
            },
            LanguageId::Json => LanguageDefinition {
                id,
                name: "JSON",
                keywords: to_set(&["true", "false", "null"], true),
                identifiers: HashSet::new(),
                preproc_identifiers: HashSet::new(),
                comment_start: "",
                comment_end: "",
                single_line_comment: "",
                preproc_char: None,
                native_tokenizer: None,
                token_rules: JSON_RULES,
                case_sensitive: true,
            },
            LanguageId::Sql => LanguageDefinition {
                id,
                name: "SQL",
                keywords: to_set(SQL_KEYWORDS, false),
                identifiers: to_set(SQL_IDENTIFIERS, false),
                preproc_identifiers: HashSet::new(),
                comment_start: "/*",
                comment_end: "*/",
                single_line_comment: "--",
                preproc_char: None,
                native_tokenizer: None,
                token_rules: SQL_RULES,
                case_sensitive: false,
            },
            LanguageId::None => LanguageDefinition {
                id,
                name: "Plain Text",
                keywords: HashSet::new(),
                identifiers: HashSet::new(),
                preproc_identifiers: HashSet::new(),
                comment_start: "",
                comment_end: "",
                single_line_comment: "",
                preproc_char: None,
                native_tokenizer: None,
                token_rules: &[],
                case_sensitive: true,
            },
        }
    }

    /// Reclassify an identifier token. `in_preprocessor` is whether the token
    /// sits on a preprocessor line.
    pub fn classify_identifier(&self, ident: &str, in_preprocessor: bool) -> PaletteIndex {
        let folded;
        let key = if self.case_sensitive {
            ident
        } else {
            folded = ident.to_ascii_uppercase();
            folded.as_str()
        };

        if in_preprocessor {
            if self.preproc_identifiers.contains(key) {
                return PaletteIndex::PreprocIdentifier;
            }
            return PaletteIndex::Identifier;
        }
        if self.keywords.contains(key) {
            PaletteIndex::Keyword
        } else if self.identifiers.contains(key) {
            PaletteIndex::KnownIdentifier
        } else if self.preproc_identifiers.contains(key) {
            PaletteIndex::PreprocIdentifier
        } else {
            PaletteIndex::Identifier
        }
    }
}

fn to_set(words: &[&str], case_sensitive: bool) -> HashSet<String> {
    words
        .iter()
        .map(|w| {
            if case_sensitive {
                w.to_string()
            } else {
                w.to_ascii_uppercase()
            }
        })
        .collect()
}

// ============================================================================
// Word lists
// ============================================================================

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
];

const C_IDENTIFIERS: &[&str] = &[
    "abort", "abs", "acos", "asin", "atan", "atexit", "atof", "atoi", "atol", "ceil", "clock",
    "cosh", "ctime", "div", "exit", "fabs", "floor", "fmod", "getchar", "getenv", "isalnum",
    "isalpha", "isdigit", "isgraph", "ispunct", "isspace", "isupper", "kbhit", "log10", "log2",
    "log", "memcmp", "modf", "pow", "printf", "sprintf", "snprintf", "putchar", "putenv", "puts",
    "rand", "remove", "rename", "sinh", "sqrt", "srand", "strcat", "strcmp", "strerror", "time",
    "tolower", "toupper", "malloc", "calloc", "realloc", "free", "memcpy", "memset", "strlen",
    "NULL", "size_t", "FILE", "fopen", "fclose", "fread", "fwrite",
];

const C_PREPROC_IDENTIFIERS: &[&str] = &[
    "define", "undef", "include", "if", "ifdef", "ifndef", "else", "elif", "endif", "line",
    "error", "pragma", "warning",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "atomic_cancel", "atomic_commit",
    "atomic_noexcept", "auto", "bitand", "bitor", "bool", "break", "case", "catch", "char",
    "char8_t", "char16_t", "char32_t", "class", "co_await", "co_return", "co_yield", "compl",
    "concept", "const", "consteval", "constexpr", "constinit", "const_cast", "continue",
    "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum", "explicit",
    "export", "extern", "false", "float", "for", "friend", "goto", "if", "import", "inline",
    "int", "long", "module", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "synchronized", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned",
    "using", "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq", "override",
    "final",
];

const CPP_IDENTIFIERS: &[&str] = &[
    "abort", "abs", "acos", "asin", "atan", "atexit", "atof", "atoi", "atol", "ceil", "clock",
    "cosh", "ctime", "div", "exit", "fabs", "floor", "fmod", "getchar", "getenv", "isalnum",
    "isalpha", "isdigit", "isgraph", "ispunct", "isspace", "isupper", "kbhit", "log10", "log2",
    "log", "memcmp", "modf", "pow", "printf", "sprintf", "snprintf", "putchar", "putenv", "puts",
    "rand", "remove", "rename", "sinh", "sqrt", "srand", "strcat", "strcmp", "strerror", "time",
    "tolower", "toupper", "std", "string", "vector", "map", "unordered_map", "set",
    "unordered_set", "min", "max", "size_t", "int8_t", "int16_t", "int32_t", "int64_t",
    "uint8_t", "uint16_t", "uint32_t", "uint64_t", "unique_ptr", "shared_ptr", "make_unique",
    "make_shared", "move", "forward", "optional", "variant", "array", "span", "cout", "cin",
    "cerr", "endl",
];

const CS_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while", "add", "alias", "ascending", "async", "await", "descending",
    "dynamic", "from", "get", "global", "group", "into", "join", "let", "nameof", "orderby",
    "partial", "remove", "select", "set", "value", "var", "when", "where", "yield", "record",
    "init",
];

const CS_IDENTIFIERS: &[&str] = &[
    "Console", "String", "Math", "List", "Dictionary", "Array", "Object", "Exception", "Task",
    "DateTime", "TimeSpan", "Guid", "Enumerable", "StringBuilder", "IEnumerable", "Action",
    "Func", "WriteLine", "ReadLine", "ToString", "Equals", "GetHashCode", "Length", "Count",
];

const ANGELSCRIPT_KEYWORDS: &[&str] = &[
    "and", "abstract", "auto", "bool", "break", "case", "cast", "class", "const", "continue",
    "default", "do", "double", "else", "enum", "false", "final", "float", "for", "from",
    "funcdef", "function", "get", "if", "import", "in", "inout", "int", "interface", "int8",
    "int16", "int32", "int64", "is", "mixin", "namespace", "not", "null", "or", "out",
    "override", "private", "protected", "return", "set", "shared", "super", "switch", "this",
    "true", "typedef", "uint", "uint8", "uint16", "uint32", "uint64", "void", "while", "xor",
];

const ANGELSCRIPT_IDENTIFIERS: &[&str] = &[
    "cos", "sin", "tab", "acos", "asin", "atan", "atan2", "cosh", "sinh", "tanh", "log",
    "log10", "pow", "sqrt", "abs", "ceil", "floor", "fraction", "closeTo", "fpFromIEEE",
    "fpToIEEE", "complex", "opEquals", "opAddAssign", "opSubAssign", "opMulAssign",
    "opDivAssign", "opAdd", "opSub", "opMul", "opDiv", "array", "string", "dictionary",
    "print",
];

const GLSL_KEYWORDS: &[&str] = &[
    "attribute", "const", "uniform", "varying", "layout", "centroid", "flat", "smooth",
    "noperspective", "break", "continue", "do", "for", "while", "switch", "case", "default",
    "if", "else", "in", "out", "inout", "float", "int", "uint", "void", "bool", "true", "false",
    "invariant", "discard", "return", "mat2", "mat3", "mat4", "vec2", "vec3", "vec4", "ivec2",
    "ivec3", "ivec4", "uvec2", "uvec3", "uvec4", "bvec2", "bvec3", "bvec4", "lowp", "mediump",
    "highp", "precision", "sampler1D", "sampler2D", "sampler3D", "samplerCube", "sampler2DShadow",
    "struct", "buffer", "shared", "coherent", "readonly", "writeonly", "image2D",
];

const GLSL_IDENTIFIERS: &[&str] = &[
    "radians", "degrees", "sin", "cos", "tan", "asin", "acos", "atan", "pow", "exp", "log",
    "exp2", "log2", "sqrt", "inversesqrt", "abs", "sign", "floor", "ceil", "fract", "mod",
    "min", "max", "clamp", "mix", "step", "smoothstep", "length", "distance", "dot", "cross",
    "normalize", "reflect", "refract", "texture", "texelFetch", "dFdx", "dFdy", "fwidth",
    "gl_Position", "gl_FragCoord", "gl_FragDepth", "gl_VertexID", "gl_InstanceID",
];

const HLSL_KEYWORDS: &[&str] = &[
    "AppendStructuredBuffer", "asm", "asm_fragment", "BlendState", "bool", "break", "Buffer",
    "ByteAddressBuffer", "case", "cbuffer", "centroid", "class", "column_major", "compile",
    "compile_fragment", "CompileShader", "const", "continue", "ComputeShader",
    "ConsumeStructuredBuffer", "default", "DepthStencilState", "DepthStencilView", "discard",
    "do", "double", "DomainShader", "dword", "else", "export", "extern", "false", "float", "for",
    "fxgroup", "GeometryShader", "groupshared", "half", "Hullshader", "if", "in", "inline",
    "inout", "InputPatch", "int", "interface", "line", "lineadj", "linear", "LineStream",
    "matrix", "min16float", "min10float", "min16int", "min12int", "min16uint", "namespace",
    "nointerpolation", "noperspective", "NULL", "out", "OutputPatch", "packoffset", "pass",
    "pixelfragment", "PixelShader", "point", "PointStream", "precise", "RasterizerState",
    "RenderTargetView", "return", "register", "row_major", "RWBuffer", "RWByteAddressBuffer",
    "RWStructuredBuffer", "RWTexture1D", "RWTexture2D", "RWTexture3D", "sample", "sampler",
    "SamplerState", "SamplerComparisonState", "shared", "snorm", "stateblock",
    "stateblock_state", "static", "string", "struct", "switch", "StructuredBuffer", "tbuffer",
    "technique", "technique10", "technique11", "texture", "Texture1D", "Texture2D",
    "Texture3D", "TextureCube", "triangle", "triangleadj", "TriangleStream", "uint", "uniform",
    "unorm", "unsigned", "vector", "vertexfragment", "VertexShader", "void", "volatile", "while",
    "bool2", "bool3", "bool4", "int2", "int3", "int4", "uint2", "uint3", "uint4", "float2",
    "float3", "float4", "half2", "half3", "half4", "float2x2", "float3x3", "float4x4",
];

const HLSL_IDENTIFIERS: &[&str] = &[
    "abort", "abs", "acos", "all", "any", "asdouble", "asfloat", "asin", "asint", "asuint",
    "atan", "atan2", "ceil", "clamp", "clip", "cos", "cosh", "cross", "ddx", "ddy", "degrees",
    "determinant", "distance", "dot", "exp", "exp2", "floor", "fmod", "frac", "isinf", "isnan",
    "ldexp", "length", "lerp", "lit", "log", "log10", "log2", "mad", "max", "min", "modf", "mul",
    "normalize", "pow", "radians", "rcp", "reflect", "refract", "round", "rsqrt", "saturate",
    "sign", "sin", "sincos", "sinh", "smoothstep", "sqrt", "step", "tan", "tanh", "transpose",
    "trunc",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield", "match", "case",
];

const PYTHON_IDENTIFIERS: &[&str] = &[
    "abs", "all", "any", "ascii", "bin", "bool", "breakpoint", "bytearray", "bytes", "callable",
    "chr", "classmethod", "compile", "complex", "delattr", "dict", "dir", "divmod", "enumerate",
    "eval", "exec", "filter", "float", "format", "frozenset", "getattr", "globals", "hasattr",
    "hash", "help", "hex", "id", "input", "int", "isinstance", "issubclass", "iter", "len",
    "list", "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open", "ord",
    "pow", "print", "property", "range", "repr", "reversed", "round", "set", "setattr", "slice",
    "sorted", "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip", "self",
];

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

const LUA_IDENTIFIERS: &[&str] = &[
    "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs", "load",
    "loadfile", "next", "pairs", "pcall", "print", "rawequal", "rawget", "rawlen", "rawset",
    "require", "select", "setmetatable", "tonumber", "tostring", "type", "xpcall", "_G",
    "_VERSION", "coroutine", "debug", "io", "math", "os", "package", "string", "table", "utf8",
];

const SQL_KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BACKUP", "BETWEEN", "BY", "CASE", "CHECK",
    "COLUMN", "CONSTRAINT", "CREATE", "DATABASE", "DEFAULT", "DELETE", "DESC", "DISTINCT",
    "DROP", "ELSE", "END", "EXEC", "EXISTS", "FOREIGN", "FROM", "FULL", "GROUP", "HAVING", "IN",
    "INDEX", "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT",
    "NULL", "ON", "OR", "ORDER", "OUTER", "PRIMARY", "PROCEDURE", "REFERENCES", "RIGHT",
    "ROWNUM", "SELECT", "SET", "TABLE", "TOP", "TRUNCATE", "UNION", "UNIQUE", "UPDATE",
    "VALUES", "VIEW", "WHEN", "WHERE", "WITH", "THEN", "BEGIN", "COMMIT", "ROLLBACK",
];

const SQL_IDENTIFIERS: &[&str] = &[
    "ABS", "AVG", "CAST", "CEILING", "COALESCE", "CONCAT", "CONVERT", "COUNT", "CURRENT_DATE",
    "CURRENT_TIMESTAMP", "DATEADD", "DATEDIFF", "FLOOR", "GETDATE", "ISNULL", "LEN", "LOWER",
    "LTRIM", "MAX", "MIN", "NULLIF", "REPLACE", "ROUND", "RTRIM", "SUBSTRING", "SUM", "TRIM",
    "UPPER", "INT", "INTEGER", "VARCHAR", "CHAR", "TEXT", "DATE", "DATETIME", "FLOAT", "DECIMAL",
    "BOOLEAN",
];

// ============================================================================
// Regex token rules
// ============================================================================

const PYTHON_RULES: &[(&str, PaletteIndex)] = &[
    (r#"[bBrRuUfF]{0,2}"(?:\\.|[^"\\])*""#, PaletteIndex::String),
    (r#"[bBrRuUfF]{0,2}'(?:\\.|[^'\\])*'"#, PaletteIndex::String),
    (
        r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|[0-9][0-9_]*(?:\.[0-9_]*)?(?:[eE][+-]?[0-9]+)?[jJ]?",
        PaletteIndex::Number,
    ),
    (r"[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier),
    (r"[\[\]{}!%^&*()\-+=~|<>?:/;,.@]", PaletteIndex::Punctuation),
];

const LUA_RULES: &[(&str, PaletteIndex)] = &[
    (r#""(?:\\.|[^"\\])*""#, PaletteIndex::String),
    (r"'(?:\\.|[^'\\])*'", PaletteIndex::String),
    (r"\[\[[^\]]*\]\]", PaletteIndex::String),
    (
        r"0[xX][0-9a-fA-F]+|[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?",
        PaletteIndex::Number,
    ),
    (r"[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier),
    (r"[\[\]{}!%^&*()\-+=~|<>?:/;,.#]", PaletteIndex::Punctuation),
];

const JSON_RULES: &[(&str, PaletteIndex)] = &[
    (r#""(?:\\.|[^"\\])*""#, PaletteIndex::String),
    (
        r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?",
        PaletteIndex::Number,
    ),
    (r"[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier),
    (r"[\[\]{}:,]", PaletteIndex::Punctuation),
];

const SQL_RULES: &[(&str, PaletteIndex)] = &[
    (r"'(?:''|[^'])*'", PaletteIndex::String),
    (r#""(?:\\.|[^"\\])*""#, PaletteIndex::String),
    (
        r"[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?",
        PaletteIndex::Number,
    ),
    (r"[a-zA-Z_@][a-zA-Z0-9_]*", PaletteIndex::Identifier),
    (r"[\[\]{}!%^&*()\-+=~|<>?:/;,.]", PaletteIndex::Punctuation),
];
