use std::collections::BTreeSet;
use std::path::Path;
use symdex::{
    extract, parse_selector, ExtractError, GoExtractor, LanguageAdapter, LanguageRegistry, FUNCTION_DEFINITION,
    METHOD_DEFINITION, TYPE_DEFINITION,
};

const SERVER: &str = r#"package server

import (
	"context"
	"net/http"
	log "github.com/rs/zerolog"
	"context"
)

type Handler interface {
	Serve(ctx context.Context, r *http.Request) error
}

type (
	Options struct {
		Addr    string
		Verbose bool
	}
	Middleware = func(Handler) Handler
)

type Server struct {
	opts Options
	log  log.Logger
}

func New(opts Options) *Server {
	type state struct{ started bool }
	return &Server{opts: opts}
}

func (s *Server) Start(ctx context.Context) error {
	return nil
}

func (s Server) Addr() string { return s.opts.Addr }

func Map[T any, U any](xs []T, f func(T) U) []U {
	out := make([]U, 0, len(xs))
	for _, x := range xs {
		out = append(out, f(x))
	}
	return out
}
"#;

fn identities(summary: &symdex::FileSummary) -> BTreeSet<(String, String, String)> {
    summary
        .symbols
        .iter()
        .map(|s| (s.kind.clone(), s.name.clone(), s.receiver.clone()))
        .collect()
}

fn native_only() -> GoExtractor {
    GoExtractor::new(LanguageRegistry::empty())
}

#[test]
fn extraction_is_idempotent() {
    let path = Path::new("server/server.go");
    let first = extract(path, SERVER.as_bytes()).unwrap();
    let second = extract(path, SERVER.as_bytes()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn imports_are_deduplicated_and_sorted() {
    let summary = extract(Path::new("server.go"), SERVER.as_bytes()).unwrap();
    assert_eq!(summary.imports, vec!["context", "github.com/rs/zerolog", "net/http"]);
    assert_eq!(summary.language, "go");
    assert_eq!(summary.path, "server.go");
}

#[test]
fn fallback_agrees_on_symbol_identities() {
    let path = Path::new("server.go");
    let primary = extract(path, SERVER.as_bytes()).unwrap();
    let fallback = native_only().extract(path, SERVER.as_bytes()).unwrap();

    assert_eq!(identities(&primary), identities(&fallback));
    assert_eq!(primary.imports, fallback.imports);

    let expected: BTreeSet<(String, String, String)> = [
        (TYPE_DEFINITION, "Handler", ""),
        (TYPE_DEFINITION, "Options", ""),
        (TYPE_DEFINITION, "Middleware", ""),
        (TYPE_DEFINITION, "Server", ""),
        (TYPE_DEFINITION, "state", ""),
        (FUNCTION_DEFINITION, "New", ""),
        (METHOD_DEFINITION, "Start", "(s *Server)"),
        (METHOD_DEFINITION, "Addr", "(s Server)"),
        (FUNCTION_DEFINITION, "Map", ""),
    ]
    .into_iter()
    .map(|(k, n, r)| (k.to_string(), n.to_string(), r.to_string()))
    .collect();
    assert_eq!(identities(&primary), expected);

    let unformatted = [
        "package p\n\nfunc (s*S) M() {}\n",
        "package p\n\nfunc (\n\ts *S,\n) M() {}\n",
        "package p\n\nfunc (S) M() {}\nfunc (p  Pair[K,V]) N() {}\n",
        "package p\n\nvar f = func() {\n\ttype inner int\n}\n",
        "\u{feff}package p\n\nfunc F() {}\n",
    ];
    for src in unformatted {
        let primary = extract(path, src.as_bytes()).unwrap();
        let fallback = native_only().extract(path, src.as_bytes()).unwrap();
        assert_eq!(identities(&primary), identities(&fallback), "{src:?}");
        assert!(!primary.symbols.is_empty(), "{src:?}");
    }
}

#[test]
fn unformatted_receiver_reads_like_gofmt() {
    let src = "package p\n\nfunc (s*S) M() {}\n";
    let summary = native_only().extract(Path::new("p.go"), src.as_bytes()).unwrap();
    assert_eq!(summary.symbols[0].receiver, "(s *S)");
    assert_eq!(extract(Path::new("p.go"), src.as_bytes()).unwrap().symbols[0].receiver, "(s *S)");
}

#[test]
fn symbols_are_ordered_by_line_then_name() {
    let src = "package p\n\ntype (Zeta int; Alpha int)\n\nfunc b() {}\nfunc a() {}\n";
    for extractor in [GoExtractor::default(), native_only()] {
        let summary = extractor.extract(Path::new("p.go"), src.as_bytes()).unwrap();
        let order: Vec<_> = summary
            .symbols
            .iter()
            .map(|s| (s.start_line, s.name.as_str()))
            .collect();
        assert_eq!(order, vec![(3, "Alpha"), (3, "Zeta"), (5, "b"), (6, "a")]);
        assert!(summary.symbols.iter().all(|s| s.start_line <= s.end_line));
        assert!(summary.symbols.iter().all(|s| s.file == "p.go"));
    }
}

#[test]
fn selector_picks_the_method_by_receiver() {
    let src = "package p\n\nfunc foo() {\n\treturn\n}\n\nfunc (t *T) bar(\n\tx int,\n) {\n}\n";
    for extractor in [GoExtractor::default(), native_only()] {
        let summary = extractor.extract(Path::new("p.go"), src.as_bytes()).unwrap();

        let foo = summary.symbols.iter().find(|s| s.name == "foo").unwrap();
        assert_eq!((foo.start_line, foo.end_line), (3, 5));
        let bar = summary.symbols.iter().find(|s| s.name == "bar").unwrap();
        assert_eq!((bar.start_line, bar.end_line), (7, 10));
        assert_eq!(bar.receiver, "(t *T)");

        let sel = parse_selector(r"method_definition[receiver=/\*T/]").unwrap();
        assert!(sel.matches(bar));
        assert!(!sel.matches(foo));
    }
}

#[test]
fn error_only_when_both_paths_fail() {
    let broken = "package p\n\nfunc (\n";

    // The syntax walker tolerates errors, so the default extractor still answers.
    assert!(extract(Path::new("p.go"), broken.as_bytes()).is_ok());

    let err = native_only().extract(Path::new("p.go"), broken.as_bytes()).unwrap_err();
    let ExtractError::NativeParse { path, line, .. } = &err;
    assert_eq!(path, "p.go");
    assert!(*line >= 3);
}

#[test]
fn non_go_path_uses_fallback() {
    let src = "package p\n\nfunc Run() {}\n";
    let summary = extract(Path::new("notes.txt"), src.as_bytes()).unwrap();
    assert_eq!(summary.symbols.len(), 1);
    assert_eq!(summary.symbols[0].signature, "func Run()");
}

#[test]
fn invalid_utf8_is_decoded_lossily() {
    let mut bytes = b"package p\n\n// \xff\xfe\nfunc Ok() {}\n".to_vec();
    bytes.extend_from_slice(b"\n");
    let summary = extract(Path::new("p.go"), &bytes).unwrap();
    assert_eq!(summary.symbols[0].name, "Ok");
    assert_eq!(summary.symbols[0].start_line, 4);
}
