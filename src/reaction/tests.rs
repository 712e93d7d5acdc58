use super::*;
use crate::particle::Particle;

#[test]
fn test_process_infers_residual() -> Result<(), ReactionError> {
    let process = Process::parse("94-PU-240(P,2P+4N)")?;
    assert_eq!(process.to_string(), "240Pu(p,2p+4n)235Np");
    assert_eq!(process.process_type(), "2p+4n");
    assert_eq!(process.exfor_style(), "94-PU-240(P,2P+4N)93-NP-235");
    assert_eq!(process.balance(), Some(((95, 241), (95, 241))));
    Ok(())
}

#[test]
fn test_process_keeps_explicit_residual() -> Result<(), ReactionError> {
    let process = Process::parse("30-ZN-64(N,G)30-ZN-65")?;
    assert_eq!(process.to_string(), "64Zn(n,gamma)65Zn");
    assert_eq!(process.products.len(), 1);
    assert_eq!(
        process.residual.as_ref().map(Particle::pretty_style).as_deref(),
        Some("65Zn")
    );
    Ok(())
}

#[test]
fn test_process_channels() -> Result<(), ReactionError> {
    let fission = Process::parse("94-PU-239(N,F)")?;
    assert_eq!(fission.to_string(), "239Pu(n,Fission)");
    assert!(fission.has_channel("F"));
    assert!(fission.residual.is_none());
    assert!(fission.balance().is_none());

    let elastic = Process::parse("1-H-1(N,EL)")?;
    assert_eq!(elastic.to_string(), "1H(n,Elastic)1H");
    assert_eq!(channel_name("TOT"), Some("Total"));
    assert_eq!(channel_name("NOPE"), None);
    Ok(())
}

#[test]
fn test_process_variable_products() -> Result<(), ReactionError> {
    let process = Process::parse("92-U-238(N,XN)")?;
    assert!(process.residual.is_none());
    assert!(process.balance().is_none());
    Ok(())
}

#[test]
fn test_process_errors() {
    for text in ["94-PU-240", "(N,F)", "94-PU-240(,F)", "94-PU-240(N,)", "94-PU-240(N,F"] {
        assert!(Process::parse(text).is_err(), "{text}");
    }
    assert!(matches!(
        Process::parse("94-PU-240(N,F)94-PU-240-M+G"),
        Err(ReactionError::IsomerMath(_))
    ));
}

#[test]
fn test_single_reaction() -> Result<(), ReactionError> {
    let measurement = Measurement::parse("(94-PU-239(N,F),,SIG)")?;
    assert_eq!(measurement.to_string(), "Cross section for 239Pu(n,Fission)");
    assert_eq!(measurement.exfor_style(), "(94-PU-239(N,F),SIG)");
    assert_eq!(measurement.reactions().len(), 1);
    assert_eq!(measurement.common_quantity(), Some(&["SIG".to_string()][..]));
    assert_eq!(measurement.equation(true), vec!["rxn 0"]);

    let reaction = Reaction::parse("(30-ZN-64(N,G)30-ZN-65,,RI)")?;
    assert_eq!(reaction.to_string(), "Resonance integral for 64Zn(n,gamma)65Zn");
    assert!(reaction.has_quantity("RI"));
    Ok(())
}

#[test]
fn test_quantity_names() -> Result<(), ReactionError> {
    let mxw = Reaction::parse("(92-U-235(N,F),,SIG,,MXW)")?;
    assert_eq!(mxw.reaction_type(), "Maxwellian average Cross section");

    let ana = Reaction::parse("(1-H-2(D,EL)1-H-2,POL/DA,,ANA)")?;
    assert_eq!(ana.reaction_type(), "Analyzing power");

    let amp = Measurement::parse("(44-RU-OXI(N,THS)44-RU-OXI,BA/COH,AMP)")?;
    assert_eq!(
        amp.to_string(),
        "Bound-atom coherent scattering amplitude for Ruthenium oxide(n,ThermalScattering)Ruthenium oxide"
    );
    Ok(())
}

#[test]
fn test_trailing_comment() -> Result<(), ReactionError> {
    let (measurement, comment) =
        parse_measurement("(30-ZN-64(N,G)30-ZN-65,,RI) Reduced resonance integral")?;
    assert!(matches!(measurement, Measurement::Single(_)));
    assert_eq!(comment, "Reduced resonance integral");

    let (_, none) = parse_measurement("(30-ZN-64(N,G)30-ZN-65,,RI)")?;
    assert!(none.is_empty());
    Ok(())
}

#[test]
fn test_ratio_combination() -> Result<(), ReactionError> {
    let measurement = Measurement::parse("((94-PU-239(N,F),,SIG)/\n(92-U-235(N,F),,SIG))")?;
    assert_eq!(
        measurement.to_string(),
        "(( Cross section for 239Pu(n,Fission) )/( Cross section for 235U(n,Fission) ))"
    );
    let Measurement::Combination(expr) = &measurement else {
        panic!("expected a combination");
    };
    assert_eq!(expr.operators(), vec![Operator::Divide]);
    assert_eq!(measurement.equation(true), vec!["(", "rxn 0", "/", "rxn 1", ")"]);
    assert_eq!(
        measurement.exfor_style(),
        "((94-PU-239(N,F),SIG)/(92-U-235(N,F),SIG))"
    );
    Ok(())
}

#[test]
fn test_operator_precedence() -> Result<(), ReactionError> {
    let measurement = Measurement::parse(
        "((92-U-235(N,F),,SIG)+(92-U-238(N,F),,SIG)*(94-PU-239(N,F),,SIG))",
    )?;
    let Measurement::Combination(ReactionExpr::Group(inner)) = &measurement else {
        panic!("expected a group");
    };
    let ReactionExpr::Binary { op, rhs, .. } = inner.as_ref() else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, Operator::Plus);
    assert!(matches!(rhs.as_ref(), ReactionExpr::Binary { op: Operator::Times, .. }));

    let spectra = Measurement::parse("((98-CF-252(0,F),,NU)//(92-U-235(N,F),,NU))")?;
    let Measurement::Combination(expr) = &spectra else {
        panic!("expected a combination");
    };
    assert_eq!(expr.operators(), vec![Operator::SpectrumRatio]);
    Ok(())
}

#[test]
fn test_isomer_ratio() -> Result<(), ReactionError> {
    let measurement = Measurement::parse("(48-CD-116(N,2N)48-CD-115-M/G,,SIG/RAT)")?;
    assert_eq!(
        measurement.to_string(),
        "(( Cross section ratio for 116Cd(n,2n)115mCd )/( Cross section ratio for 116Cd(n,2n)115m0Cd ))"
    );
    assert_eq!(measurement.equation(true), vec!["rxn 0", "/", "rxn 1"]);
    Ok(())
}

#[test]
fn test_isomer_sums() -> Result<(), ReactionError> {
    let sg = Measurement::parse("(96-CM-248(10-NE-22,5N)106-SG-265-M1+M2,,SIG)")?;
    assert_eq!(
        sg.to_string(),
        "(( Cross section for 248Cm(22Ne,5n)265mSg )+( Cross section for 248Cm(22Ne,5n)265m2Sg ))"
    );

    let hf = Measurement::parse("(72-HF-178-M2(N,G)72-HF-179-G+M2,,SIG,,RES)")?;
    assert_eq!(
        hf.to_string(),
        "(( Cross section for 178m2Hf(n,gamma)179m0Hf )+( Cross section for 178m2Hf(n,gamma)179m2Hf ))"
    );

    let y = Measurement::parse("(40-ZR-88(N,N+P)39-Y-87-M/T,,SIG)")?;
    let Measurement::Isomers(combo) = &y else {
        panic!("expected isomer branches");
    };
    assert_eq!(combo.ops, vec![Operator::Divide]);
    for branch in &combo.branches {
        assert!(branch.process.to_string().ends_with("87mY"));
    }
    Ok(())
}

#[test]
fn test_isomers_inside_combination() -> Result<(), ReactionError> {
    let measurement = Measurement::parse(
        "((79-AU-197(N,2N)79-AU-196-M2,,SIG)/(79-AU-197(N,2N)79-AU-196-G+M1,,SIG))",
    )?;
    assert_eq!(
        measurement.to_string(),
        "(( Cross section for 197Au(n,2n)196m2Au )/( (( Cross section for 197Au(n,2n)196m0Au )+( Cross section for 197Au(n,2n)196mAu )) ))"
    );
    assert_eq!(measurement.reactions().len(), 3);
    assert_eq!(
        measurement.equation(true),
        vec!["(", "rxn 0", "/", "(", "rxn 1", "+", "rxn 2", ")", ")"]
    );
    Ok(())
}

#[test]
fn test_mixed_quantities() -> Result<(), ReactionError> {
    let measurement = Measurement::parse("((92-U-235(N,F),,SIG)/(92-U-235(N,G),,RI))")?;
    assert!(measurement.common_quantity().is_none());
    assert_eq!(measurement.quantities().len(), 2);
    Ok(())
}

#[test]
fn test_reaction_errors() {
    for text in [
        "",
        "94-PU-239(N,F),,SIG",
        "(94-PU-239(N,F),,SIG",
        "(94-PU-239(N,F))",
        "((94-PU-239(N,F),,SIG)/)",
        "((94-PU-239(N,F),,SIG)",
    ] {
        assert!(parse_measurement(text).is_err(), "{text:?}");
    }

    match parse_measurement("(94-PU-239(N,F),,SIG)") {
        Ok(_) => {}
        Err(err) => panic!("unexpected error {err}"),
    }

    let err = parse_measurement("(94-QQ-239(N,F),,SIG)").err();
    assert!(matches!(err, Some(ReactionError::Particle { .. })));
}
