use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

use qlv_crypto::{flip_random_bit, LedgerTree, Sha256Digest, Verifier};
use qlv_proof::Proof;
use qlv_types::HashValue;

use crate::cli::*;
use crate::request::{read_proof_argument, read_proof_response, HashEncoding, VerificationRequest};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Verify(args) => cmd_verify(args, &cli.format),
        Command::Join(args) => cmd_join(args, &cli.format).map(|()| ExitCode::SUCCESS),
        Command::Tamper(args) => cmd_tamper(args, &cli.format).map(|()| ExitCode::SUCCESS),
        Command::Demo(args) => cmd_demo(args, &cli.format).map(|()| ExitCode::SUCCESS),
    }
}

/// Outcome of one verification, as printed with `--format json`.
#[derive(Debug, Serialize)]
pub struct VerificationReport {
    pub verified: bool,
    pub document_hash: HashValue,
    pub ledger_digest: HashValue,
    pub proof_depth: usize,
}

fn resolve_request(args: VerifyArgs) -> anyhow::Result<VerificationRequest> {
    if let Some(path) = &args.request {
        return VerificationRequest::load(path);
    }
    let proof = match (&args.proof, &args.proof_response) {
        (Some(arg), _) => read_proof_argument(arg)?,
        (None, Some(path)) => read_proof_response(path)?,
        (None, None) => anyhow::bail!("one of --proof or --proof-response is required"),
    };
    Ok(VerificationRequest {
        document_hash: args.document_hash.context("--document-hash is required")?,
        digest: args.digest.context("--digest is required")?,
        proof,
        encoding: args.encoding,
    })
}

pub fn verify_request(request: &VerificationRequest) -> anyhow::Result<VerificationReport> {
    let document_hash = request.document_hash()?;
    let ledger_digest = request.ledger_digest()?;
    let proof = Proof::from_ion_text(&request.proof).context("cannot decode revision proof")?;
    let verified = Verifier::sha256()
        .verify_proof(document_hash, ledger_digest, &proof)
        .context("cannot determine inclusion")?;
    Ok(VerificationReport {
        verified,
        document_hash,
        ledger_digest,
        proof_depth: proof.len(),
    })
}

fn cmd_verify(args: VerifyArgs, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let request = resolve_request(args)?;
    let report = verify_request(&request)?;

    if report.verified {
        info!(digest = %report.ledger_digest, "revision verified");
    } else {
        warn!(digest = %report.ledger_digest, "revision not included under digest");
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            if report.verified {
                println!("{} Revision verified", "✓".green().bold());
            } else {
                println!("{} Revision is not included under this digest", "✗".red().bold());
            }
            println!("  Document hash: {}", request.encoding.encode(&report.document_hash).cyan());
            println!("  Ledger digest: {}", request.encoding.encode(&report.ledger_digest).cyan());
            println!("  Proof depth: {}", report.proof_depth.to_string().bold());
        }
    }

    Ok(if report.verified { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn cmd_join(args: JoinArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let left = args.encoding.parse(&args.left).context("invalid left hash")?;
    let right = args.encoding.parse(&args.right).context("invalid right hash")?;
    let joined = Verifier::sha256()
        .join(left.as_bytes(), right.as_bytes())
        .context("join failed")?;
    let joined = HashValue::from_slice(&joined)?;
    print_hash(&joined, args.encoding, format)
}

fn cmd_tamper(args: TamperArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let original = args.encoding.parse(&args.hash).context("invalid hash")?;
    let altered = flip_random_bit(original.as_bytes())?;
    let altered = HashValue::from_slice(&altered)?;
    print_hash(&altered, args.encoding, format)
}

fn print_hash(hash: &HashValue, encoding: HashEncoding, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&encoding.encode(hash))?),
        OutputFormat::Text => println!("{}", encoding.encode(hash)),
    }
    Ok(())
}

/// Build a sample tree of `leaves` revisions and the request verifying the
/// revision at `index`.
pub fn demo_request(leaves: usize, index: usize) -> anyhow::Result<VerificationRequest> {
    let hashes: Vec<HashValue> = (0..leaves)
        .map(|i| Sha256Digest::hash(format!("revision-{i}").as_bytes()))
        .collect();
    let tree = LedgerTree::from_leaves(hashes);
    let root = tree.root().context("demo tree needs at least one leaf")?;
    let leaf = tree
        .leaf(index)
        .with_context(|| format!("index {index} is out of range for {leaves} leaves"))?;
    let proof = tree
        .proof(index)
        .with_context(|| format!("no proof for leaf {index}"))?;
    let encoding = HashEncoding::Base64;
    Ok(VerificationRequest {
        document_hash: encoding.encode(&leaf),
        digest: encoding.encode(&root),
        proof: proof.to_ion_text(),
        encoding,
    })
}

fn cmd_demo(args: DemoArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let request = demo_request(args.leaves, args.index)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&request)?),
        OutputFormat::Text => print!("{}", request.to_toml()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlv_crypto::flip_bit;

    #[test]
    fn demo_request_verifies() {
        for index in 0..5 {
            let request = demo_request(5, index).unwrap();
            let report = verify_request(&request).unwrap();
            assert!(report.verified, "leaf {index} should verify");
        }
    }

    #[test]
    fn demo_rejects_bad_input() {
        assert!(demo_request(0, 0).is_err());
        assert!(demo_request(4, 4).is_err());
    }

    #[test]
    fn tampered_digest_is_negative_verdict() {
        let mut request = demo_request(8, 3).unwrap();
        let digest = request.ledger_digest().unwrap();
        let altered = flip_bit(digest.as_bytes(), 17).unwrap();
        request.digest = HashValue::from_slice(&altered).unwrap().to_base64();
        let report = verify_request(&request).unwrap();
        assert!(!report.verified);
        assert_eq!(report.proof_depth, 3);
    }

    #[test]
    fn malformed_proof_is_error() {
        let mut request = demo_request(8, 3).unwrap();
        request.proof = "[{{AAEC}}".into();
        let err = verify_request(&request).unwrap_err();
        assert!(err.to_string().contains("cannot decode revision proof"));
    }

    #[test]
    fn inline_arguments_need_a_proof() {
        let args = VerifyArgs {
            request: None,
            document_hash: Some("a".into()),
            digest: Some("b".into()),
            proof: None,
            proof_response: None,
            encoding: HashEncoding::Base64,
        };
        assert!(resolve_request(args).is_err());
    }

    #[test]
    fn inline_arguments_build_request() {
        let args = VerifyArgs {
            request: None,
            document_hash: Some("a".into()),
            digest: Some("b".into()),
            proof: Some("[]".into()),
            proof_response: None,
            encoding: HashEncoding::Hex,
        };
        let request = resolve_request(args).unwrap();
        assert_eq!(request.proof, "[]");
        assert_eq!(request.encoding, HashEncoding::Hex);
    }

    #[test]
    fn report_serializes_hashes_as_base64() {
        let request = demo_request(2, 1).unwrap();
        let report = verify_request(&request).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verified"], true);
        assert_eq!(json["ledger_digest"], request.digest.as_str());
    }
}
