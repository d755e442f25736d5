use elfname_core::dimensions::{CulturalOrigin, Era, Gender, LengthTier, Nation};
use elfname_core::engine::trace::RejectReason;
use elfname_core::phonotactics;
use elfname_core::report::{CorpusReport, simulate_family_shares};
use elfname_core::{Dimensions, EngineConfig, GenerationRequest, NameGenerator, Strategy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // The generator is immutable; batch memory lives in the session
    let generator = NameGenerator::new(EngineConfig::default())?;
    let mut session = generator.session();

    // No dimension at all: the legacy assembler over the raw pools
    let output = generator.generate(&GenerationRequest::new(5), &mut session);
    println!("Unconstrained: {}", output.names.join(", "));

    // Dimension values parse from their kebab-case spelling
    let origin: CulturalOrigin = "wood-elf".parse()?;
    match "modern".parse::<Era>() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {e}"),
    }

    // Seeded requests are reproducible; "test-1" and "test-2" share one
    // batch memory, so the second call never repeats the first
    let dims = Dimensions {
        cultural_origin: Some(origin),
        era: Some(Era::Revival),
        gender: Some(Gender::Feminine),
        ..Default::default()
    };
    for seed in ["test-1", "test-2"] {
        let request = GenerationRequest::new(5).dimensions(dims).surname(true).seed(seed);
        let output = generator.generate(&request, &mut session);
        println!("{seed}: {}", output.names.join(", "));
    }

    // Conflicting dimensions degrade instead of failing; the trace says how
    let request = GenerationRequest::new(3)
        .dimensions(Dimensions {
            nation: Some(Nation::Highcourt),
            cultural_origin: Some(CulturalOrigin::Drow),
            length: Some(LengthTier::Long),
            ..Default::default()
        })
        .seed("conflict-1")
        .trace(true);
    let output = generator.generate(&request, &mut session);
    for (name, trace) in output.names.iter().zip(output.traces.unwrap_or_default()) {
        println!(
            "{name}: {} events, {} attempts, {} phonotactic rejections, degraded: {}",
            trace.events.len(),
            trace.attempts,
            trace.rejected(RejectReason::Phonotactics),
            trace.degraded()
        );
    }

    // Curated and blended strategies draw from the corpus
    for strategy in [Strategy::Curated, Strategy::Blended] {
        let request = GenerationRequest::new(5).dimensions(dims).strategy(strategy).seed("corpus-1");
        let output = generator.generate(&request, &mut session);
        println!("{strategy}: {}", output.names.join(", "));
    }

    // The validator explains its verdicts
    for word in ["Aelith", "Xkqz", "Thrandor"] {
        match phonotactics::check(word) {
            Ok(()) => println!("{word}: pronounceable"),
            Err(reason) => println!("{word}: {reason}"),
        }
    }

    // Diagnostics
    let report = CorpusReport::of_corpus();
    println!("Corpus: {} entries, per origin {:?}", report.entries, report.by_origin);
    let shares = simulate_family_shares(&generator, Dimensions::default(), 32, 50);
    println!(
        "Largest prefix family share over {} batches: p50 {:.3}, p90 {:.3}, max {:.3}",
        shares.batches, shares.p50, shares.p90, shares.max
    );

    Ok(())
}
