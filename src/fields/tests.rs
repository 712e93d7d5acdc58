use super::*;
use crate::reaction::Measurement;
use crate::record::PlainField;

fn field(text: &str) -> PlainField {
    let lines: Vec<&str> = text.lines().collect();
    PlainField::parse(&lines)
}

const ZN_REACTION: &str = r"REACTION  1((30-ZN-64(N,G)30-ZN-65,,RI)/
           (30-ZN-64(N,G)30-ZN-65,,SIG))
          2(30-ZN-64(N,G)30-ZN-65,,RI)
           Reduced resonance integral and ratio to thermal
           absorption cross section";

const GEM_AUTHORS: &str = r"AUTHOR     (A.Budzanowski, A.Chatterjee, R.Gebel, P.Hawranek,
           R.Jahn, V.Jha, K.Kilian, S.Kliczewski, Da.Kirillov,
           Di.Kirillov, D.Kolev, M.Kravcikova, M.Lesiak, J.Lieb,
           H.Machner, A.Magiera, R.Maier, G.Martinska, S.Nedev,
           N.Piskunov, D.Prasuhn, D.Protic, J.Ritman,
           P.von Rossen, B.J.Roy, I.Sitnik, R.Siudak, R.Tsenov,
           J.Urban, G.Vankova, C.Wilkin) GEM Collaboration";

const MANY_INSTITUTES: &str = r"INSTITUTE  (3POLIFJ)
           (3INDTRM)
           (2GERJUL)
           (3POLUJK)
           (2GERBON)
           (2GERUDE)
           (4ZZZDUB)
           (3BULSOF)
           (3SLKSLK) Technical university, Kosice, Slovakia
           (1USAUSA) George Mason University, Fairfax, VA, USA
           (3SLKSLK) P.J. Safarik University, Kosice, Slovakia
           (3BULBUL) University of chemical technology and
                      Metallurgy, Sofia, Bulgaria
           (2UK UK) Department of physics and Astronomy, UCL,
                    London, UK";

const LONG_REFERENCES: &str = r"REFERENCE  (J,APP/B,2,489,1971) Full information
           (P,INR-1318,29,197104)Partial,total sigmas cfd theory
           (P,INDC(SEC)-18,120,197108) Identical to INR-1318
           (R,INR-1224,197009)Experim.set-up described.Full paper
           (P,INR-1197,26,197005)Small reprt.Same info as INR-1224
           (J,CJP,47,2849,196912) Theo. Calculation of (n,g) sigma";

const SPLIT_TAUTOLOGY: &str = r"REFERENCE  ((R,CEA-N-1459,7108)=(R,EANDC(E)-142L,7108)=
           (R,INDC(FR)-4L,7108)) INTERNAL REPT,EXP.DESCR.,RES.PAR.
            RESONANCE PARAMETERS CODED IN ENTRY 20121.
           (W,TELLIER,7110)     DATA ON TAPES.";

const BATHROOM_SINK: &str = r"REFERENCE  (P,NEANDC(E)-232,(3),5,198203) Main reference,
                                        DATA ARE GIVEN.
           (P,NEANDC(E)-222,(3),3,198103)
           ((R,ANL-83-4,1983)=
           (R,NEANDC(US)-214,1983))  ANL-83-4 report.
                                     Data are given
           (P,NEANDC(E)-212,(3),10,198006)";

const KITCHEN_SINK: &str = r"REFERENCE  (J,NSTS,2,(1),204,200208)  Main referene, Graphs Given
           (J,NSTS,1,683,2000)        Details of Experiment
           (J,NIM/A,446,(3),536,2000) Graphs and Experimental
                                      details
           ((S,JAERI-C-2000-005,243,19991119)=
           (S,INDC(JPN)-185/U,243,19991119)) Graphs and
                                        Experimental Details
           ((S,JAERI-C-99-002,153,19981120)=
           (S,INDC(JPN)-182/U,153,19981120)) Graphs and
                                        Experimental Details";

const NORMALIZED_MONITOR: &str = r"MONITOR    (62-SM-147(N,A)60-ND-144,,SIG) Data were normalized
           over the interval 300-2500 eV to the data given
           in monitor reference";

const HEADED_MONITORS: &str = r"MONITOR    ((MONIT1)79-AU-197(N,G)79-AU-198,,SIG,,MXW) Monitor in
             form of alloy of 0.134% in thin Al metal foil
           ((MONIT3)27-CO-59(N,G)27-CO-60,,SIG,,MXW) Monitor in
           form of dilute  alloy  of 0.438% in thin Al metal foil";

fn reference_text(text: &str) -> Result<String, FieldError> {
    Ok(ReferenceField::parse(&field(text))?.to_string())
}

#[test]
fn test_field_kind_dispatch() -> Result<(), FieldError> {
    assert_eq!(FieldKind::from_tag("REACTION"), FieldKind::Reaction);
    assert_eq!(FieldKind::from_tag("REL-REF"), FieldKind::Reference);
    assert_eq!(FieldKind::from_tag("INSTITUTE "), FieldKind::Institute);
    assert_eq!(FieldKind::from_tag("INC-SOURCE"), FieldKind::Plain);

    let raw = field("INC-SOURCE  BEAM-INTENSITY IS 0.5NA\n           (ATOMI) with a Wien filter");
    let plain = Field::interpret(&raw)?;
    assert_eq!(plain.kind(), FieldKind::Plain);
    assert_eq!(plain.raw(), &raw);
    assert_eq!(plain.to_string(), "BEAM-INTENSITY IS 0.5NA (ATOMI) with a Wien filter");

    let title = Field::interpret(&field("TITLE       ACCELERATION OF PROTONS"))?;
    assert_eq!(title.kind(), FieldKind::Title);
    assert_eq!(title.to_string(), "Acceleration Of Protons");
    Ok(())
}

#[test]
fn test_interpret_surfaces_errors() {
    let err = Field::interpret(&field("AUTHOR     D.L.SMITH")).err();
    assert!(matches!(err, Some(FieldError::AuthorParsing { .. })));

    let err = Field::interpret(&field("REFERENCE  (Q,NOPE,1,1999)")).err();
    assert_eq!(err.map(|e| e.kind_name()), Some("ReferenceParsingError"));
}

#[test]
fn test_title_case() {
    assert_eq!(title_case("P.VON ROSSEN"), "P.Von Rossen");
    assert_eq!(title_case("51-V(N,P)51-TI"), "51-V(N,P)51-Ti");
    assert_eq!(title_case("it's"), "It'S");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_title_field() {
    let short = TitleField::parse(&field("TITLE       ACCELERATION OF PROTONS AND DEUTERONS POLARIZED"));
    assert_eq!(short.to_string(), "Acceleration Of Protons And Deuterons Polarized");

    let long = TitleField::parse(&field(
        "TITLE      MEASURED ACTIVATION CROSS SECTIONS BELOW 10 MEV FOR THE\n            51-V(N,P)51-TI AND 51-V(N,ALPHA)48-SC REACTIONS.",
    ));
    assert_eq!(
        long.title,
        "Measured Activation Cross Sections Below 10 Mev For The 51-V(N,P)51-Ti And 51-V(N,Alpha)48-Sc Reactions."
    );
}

#[test]
fn test_author_field() -> Result<(), FieldError> {
    let short = AuthorField::parse(&field("AUTHOR     (D.L.SMITH,J.W.MEADOWS,I.KANNO)"))?;
    assert_eq!(short.to_string(), "D.L.Smith, J.W.Meadows, I.Kanno");
    assert_eq!(short.family_names(), vec!["Smith", "Meadows", "Kanno"]);

    let long = AuthorField::parse(&field(
        "AUTHOR     (K.HATANAKA,N.MATSUOKA,H.SAKAI,T.SAITO,H.TAMURA,\n           K.HOSONO,M.KONDO,K.IMAI,H.SHIMIZU,K.NISHIMURA)",
    ))?;
    assert_eq!(long.authors.len(), 10);
    assert_eq!(long.family_names()[9], "Nishimura");
    assert_eq!(
        long.to_string(),
        "K.Hatanaka, N.Matsuoka, H.Sakai, T.Saito, H.Tamura, K.Hosono, M.Kondo, K.Imai, H.Shimizu, K.Nishimura"
    );
    Ok(())
}

#[test]
fn test_author_field_ignores_collaboration() -> Result<(), FieldError> {
    let gem = AuthorField::parse(&field(GEM_AUTHORS))?;
    assert_eq!(gem.authors.len(), 31);
    assert_eq!(gem.authors[8], "Da.Kirillov");
    assert_eq!(gem.authors[23], "P.Von Rossen");
    assert_eq!(gem.authors[30], "C.Wilkin");

    let families = gem.family_names();
    assert_eq!(&families[8..10], &["Kirillov", "Kirillov"]);
    assert_eq!(families[23], "Von Rossen");
    assert!(!gem.to_string().contains("Gem"));
    Ok(())
}

#[test]
fn test_author_field_without_authors() -> Result<(), FieldError> {
    for text in ["AUTHOR     .NOT GIVEN.", "AUTHOR     No author given"] {
        let empty = AuthorField::parse(&field(text))?;
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), "No author given");
    }
    Ok(())
}

#[test]
fn test_institute_field() -> Result<(), FieldError> {
    let short = InstituteField::parse(&field("INSTITUTE  (1USAANL)"))?;
    assert_eq!(short.to_string(), "Argonne National Laboratory, Argonne, IL");
    assert_eq!(short.institutes[0].code, "1USAANL");

    let long = InstituteField::parse(&field(
        "INSTITUTE  (2JPNOSA) RESEARCH CENTER FOR NUCLEAR PHYSICS, OSAKA\n            UNIV.\n           (2JPNKTO)",
    ))?;
    assert_eq!(
        long.to_string(),
        "Osaka Univ., Osaka (Research Center For Nuclear Physics, Osaka Univ.); Kyoto Univ."
    );
    Ok(())
}

#[test]
fn test_institute_field_unknown_codes() -> Result<(), FieldError> {
    let many = InstituteField::parse(&field(MANY_INSTITUTES))?;
    assert_eq!(
        many.to_string(),
        "Inst.Fiz.Jadr., Krakow; Bhabha Atomic Res. Centre, Trombay; Kernforschungsanlage Juelich; \
         Krakow, Jagellonian Univ; Univ. of Bonn; 2GERUDE; Joint Inst.for Nucl.Res., Dubna; \
         Univ.of Sofia; Slovakia (Technical University, Kosice, Slovakia); \
         United States of America (George Mason University, Fairfax, Va, Usa); \
         Slovakia (P.J. Safarik University, Kosice, Slovakia); \
         Bulgaria (University Of Chemical Technology And Metallurgy, Sofia, Bulgaria); \
         2UK (Department Of Physics And Astronomy, Ucl, London, Uk)"
    );
    Ok(())
}

#[test]
fn test_institute_field_shared_parentheses() -> Result<(), FieldError> {
    let shared = InstituteField::parse(&field("INSTITUTE  (2JPNOSA,2JPNKTO) JOINT WORK"))?;
    let codes: Vec<&str> = shared.institutes.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["2JPNOSA", "2JPNKTO"]);
    assert_eq!(shared.institutes[0].comment, "Joint Work");
    assert!(shared.institutes[1].comment.is_empty());

    assert!(matches!(
        InstituteField::parse(&field("INSTITUTE  2JPNOSA")),
        Err(FieldError::InstituteParsing { .. })
    ));
    Ok(())
}

#[test]
fn test_parse_year() {
    assert_eq!(parse_year("1983").as_deref(), Some("1983"));
    assert_eq!(parse_year("8412").as_deref(), Some("1984"));
    assert_eq!(parse_year("197104").as_deref(), Some("1971"));
    assert_eq!(parse_year("19991119").as_deref(), Some("1999"));
    assert_eq!(parse_year("73").as_deref(), Some("1973"));
    assert_eq!(parse_year("05").as_deref(), Some("2005"));
    assert_eq!(parse_year("19AB"), None);
    assert_eq!(parse_year(""), None);
}

#[test]
fn test_reference_code() -> Result<(), FieldError> {
    let code = ReferenceCode::parse("J,NIM,217,397,1983")?;
    assert_eq!(code.reftype, "J");
    assert_eq!(code.details, vec!["217", "397"]);
    assert_eq!(code.year, "1983");
    assert_eq!(code.publication_type(), Some("Journal"));
    assert_eq!(code.exfor_style(), "J,NIM,217,397,1983");
    assert_eq!(code.to_string(), "Nuclear Instrum.and Methods in Physics Res. 217, 397 (1983)");

    assert_eq!(publication_type("W"), Some("Private Comm."));
    assert_eq!(publication_type("Q"), None);
    assert!(ReferenceCode::parse("J,NIM").is_err());
    assert!(ReferenceCode::parse("J,NIM,217,397,19XX").is_err());
    Ok(())
}

#[test]
fn test_reference_field() -> Result<(), FieldError> {
    assert_eq!(
        reference_text("REFERENCE  (J,NIM,217,397,1983)")?,
        "Nuclear Instrum.and Methods in Physics Res. 217, 397 (1983)"
    );
    assert_eq!(
        reference_text("REFERENCE  (J,PR/C,72,034302,2005)\n           #DOi=10.1103/PhysRevC.72.034302")?,
        "Physical Review, Part C, Nuclear Physics 72, 034302 (2005)"
    );
    assert_eq!(
        reference_text("REFERENCE  (J,ANE,11,623,8412)\n           (P,ANL-NDM-85,8406)")?,
        "Annals of Nuclear Energy 11, 623 (1984); Progress report: ANL-NDM-85  (1984)"
    );
    assert_eq!(
        reference_text(LONG_REFERENCES)?,
        "Acta Physica Polonica, Part B 2, 489 (1971); Progress report: INR-1318 29 (1971); \
         Progress report: INDC(SEC)-18 120 (1971); Report other than progress report: INR-1224  (1970); \
         Progress report: INR-1197 26 (1970); Canadian Journal of Physics 47, 2849 (1969)"
    );
    Ok(())
}

#[test]
fn test_reference_comments() -> Result<(), FieldError> {
    let refs = ReferenceField::parse(&field(LONG_REFERENCES))?;
    let cited = &refs.references[&' '];
    assert_eq!(cited.len(), 6);
    assert_eq!(cited[0].comment, "Full information");
    assert_eq!(cited[5].comment, "Theo. Calculation of (n,g) sigma");
    assert_eq!(refs.primary().map(|c| c.name.as_str()), Some("APP/B"));
    assert_eq!(refs.codes().count(), 6);
    Ok(())
}

#[test]
fn test_reference_tautologies() -> Result<(), FieldError> {
    assert_eq!(
        reference_text(
            "REFERENCE  ((W,KOBAYASHI,73)=(R,KURRI-TR-6,1,73))\n            ANNU.REP.RES.REACTOR INST., KYOTO UNIV.\n           (P,EANDC(J)-26,39,7208) PROG.REP. FOR NP-237 AND TH-232"
        )?,
        "Private communication: Kobayashi  (1973); Report other than progress report: KURRI-TR-6 1 (1973); \
         Progress report: EANDC(J)-26 39 (1972)"
    );
    assert_eq!(
        reference_text(
            "REFERENCE  (J,NP,70,421,6508)\n           ((R,JAERI-1078,6507)=(R,EANDC(J)-5S,6507))\n           (W,NISHIMURA,7110)"
        )?,
        "Nuclear Physics 70, 421 (1965); Report other than progress report: JAERI-1078  (1965); \
         Report other than progress report: EANDC(J)-5S  (1965); Private communication: Nishimura  (1971)"
    );
    assert_eq!(
        reference_text(SPLIT_TAUTOLOGY)?,
        "Report other than progress report: CEA-N-1459  (1971); \
         Report other than progress report: EANDC(E)-142L  (1971); \
         Report other than progress report: INDC(FR)-4L  (1971); Private communication: Tellier  (1971)"
    );
    assert_eq!(
        reference_text(
            "REFERENCE  (J,NST,31,1239,199412)  Main reference, data are given\n           ((S,JAERI-M-94-019,171,199311)=\n           (S,INDC(JPN)-169/L,171,199311))"
        )?,
        "J. of Nuclear Science and Technology, Tokyo 31, 1239 (1994); \
         Report containing conference proc.: JAERI-M-94-019 171 (1993); \
         Report containing conference proc.: INDC(JPN)-169/L 171 (1993)"
    );
    assert_eq!(
        reference_text("REFERENCE  ((R,YK-5(49),17,198211)=\n           (J,YK,1982,(5),17,198211))  Main Reference")?,
        "Report other than progress report: YK-5(49) 17 (1982); \
         Vop. At.Nauki i Tekhn.,Ser.Yadernye Konstanty 1982, (5), 17 (1982)"
    );
    Ok(())
}

#[test]
fn test_reference_sinks() -> Result<(), FieldError> {
    assert_eq!(
        reference_text(BATHROOM_SINK)?,
        "Progress report: NEANDC(E)-232 (3), 5 (1982); Progress report: NEANDC(E)-222 (3), 3 (1981); \
         Report other than progress report: ANL-83-4  (1983); \
         Report other than progress report: NEANDC(US)-214  (1983); \
         Progress report: NEANDC(E)-212 (3), 10 (1980)"
    );
    assert_eq!(
        reference_text(KITCHEN_SINK)?,
        "J.Nucl.Science and Technol.Tokyo,Supplement 2, (1), 204 (2002); \
         J.Nucl.Science and Technol.Tokyo,Supplement 1, 683 (2000); \
         Nucl. Instrum. Methods in Physics Res., Sect.A 446, (3), 536 (2000); \
         Report containing conference proc.: JAERI-C-2000-005 243 (1999); \
         Report containing conference proc.: INDC(JPN)-185/U 243 (1999); \
         Report containing conference proc.: JAERI-C-99-002 153 (1998); \
         Report containing conference proc.: INDC(JPN)-182/U 153 (1998)"
    );

    let sink = ReferenceField::parse(&field(BATHROOM_SINK))?;
    let cited = &sink.references[&' '];
    assert_eq!(cited[2].comment, cited[3].comment);
    assert!(cited[2].comment.starts_with("ANL-83-4 report."));
    Ok(())
}

#[test]
fn test_reference_errors() {
    assert!(matches!(
        ReferenceField::parse(&field("REFERENCE  loose text\n           (J,NIM,217,397,1983)")),
        Err(FieldError::ReferenceParsing { .. })
    ));
    assert!(ReferenceField::parse(&field("REFERENCE  (J,NIM,217,397,1983")).is_err());
    assert!(ReferenceField::parse(&field("REFERENCE  ((J,NIM,217,397,1983)+(J,NIM,1,2,1983))")).is_err());
}

#[test]
fn test_reaction_field() -> Result<(), FieldError> {
    let ratio = ReactionField::parse(&field(
        "REACTION   ((30-ZN-64(N,G)30-ZN-65,,RI)/\n           (30-ZN-64(N,G)30-ZN-65,,SIG))",
    ))?;
    assert_eq!(
        ratio.to_string(),
        "(( Resonance integral for 64Zn(n,gamma)65Zn )/( Cross section for 64Zn(n,gamma)65Zn ))"
    );
    assert_eq!(ratio.equation(' ', true), Some(vec![
        "(".to_string(),
        "rxn 0".to_string(),
        "/".to_string(),
        "rxn 1".to_string(),
        ")".to_string(),
    ]));
    assert_eq!(ratio.reactions(' ').len(), 2);
    assert!(ratio.reactions('9').is_empty());
    Ok(())
}

#[test]
fn test_reaction_field_pointers() -> Result<(), FieldError> {
    let zn = ReactionField::parse(&field(ZN_REACTION))?;
    assert_eq!(zn.pointers().collect::<Vec<_>>(), vec!['1', '2']);
    assert_eq!(
        zn.to_string(),
        "[1] (( Resonance integral for 64Zn(n,gamma)65Zn )/( Cross section for 64Zn(n,gamma)65Zn )); \
         [2] Resonance integral for 64Zn(n,gamma)65Zn, Reduced resonance integral and ratio to thermal \
         absorption cross section"
    );

    let zr = ReactionField::parse(&field(
        "REACTION  1(40-ZR-88(N,N+P)39-Y-87-M/T,,SIG/RAT)\n          2(40-ZR-88(N,N+P)39-Y-87,,SIG)",
    ))?;
    assert_eq!(
        zr.to_string(),
        "[1] (( Cross section ratio for 88Zr(n,n+p)87mY )/( Cross section ratio for 88Zr(n,n+p)87mY )); \
         [2] Cross section for 88Zr(n,n+p)87Y"
    );
    Ok(())
}

#[test]
fn test_reaction_field_isolates_bad_pointer() {
    let raw = field("REACTION  1(94-PU-239(N,F),,SIG)\n          2(94-QQ-239(N,F),,SIG)");
    let each = ReactionField::parse_each(&raw);
    assert!(each[&'1'].is_ok());
    match &each[&'2'] {
        Err(FieldError::ReactionParsing { pointer, .. }) => assert_eq!(*pointer, '2'),
        other => panic!("expected a reaction error, got {other:?}"),
    }
    assert!(ReactionField::parse(&raw).is_err());
}

#[test]
fn test_monitor_field() -> Result<(), FieldError> {
    let single = MonitorField::parse(&field("MONITOR    (92-U-235(N,F),,SIG)"))?;
    let monitors = single.get(' ').unwrap_or_default();
    assert_eq!(monitors.len(), 1);
    assert!(monitors[0].comment.is_empty());
    assert!(monitors[0].heading.is_none());
    assert_eq!(single.to_string(), "Cross section for 235U(n,Fission)");

    let pointed = MonitorField::parse(&field("MONITOR   1(79-AU-197(N,2N)79-AU-196,,SIG)"))?;
    assert!(pointed.for_pointer('1').is_some());
    assert!(pointed.for_pointer('2').is_none());
    assert!(single.for_pointer('2').is_some());

    let normalized = MonitorField::parse(&field(NORMALIZED_MONITOR))?;
    let monitor = &normalized.monitors[&' '][0];
    assert_eq!(
        monitor.comment,
        "Data were normalized over the interval 300-2500 eV to the data given in monitor reference"
    );
    assert!(monitor.measurement.is_some());
    Ok(())
}

#[test]
fn test_monitor_field_free_text() -> Result<(), FieldError> {
    let boring = MonitorField::parse(&field(
        "MONITOR    Reactor grade graphite samples with thickness of 7\n           cm and 13 cm were useded for monitoring",
    ))?;
    let monitor = &boring.monitors[&' '][0];
    assert!(monitor.measurement.is_none());
    assert_eq!(
        monitor.comment,
        "Reactor grade graphite samples with thickness of 7 cm and 13 cm were useded for monitoring"
    );

    let nothing = MonitorField::parse(&field("MONITOR    No information"))?;
    assert_eq!(nothing.to_string(), "No information");
    Ok(())
}

#[test]
fn test_monitor_field_headings() -> Result<(), FieldError> {
    let two = MonitorField::parse(&field(
        "MONITOR    ((MONIT1)79-AU-197(N,G)79-AU-198,,RI)\n           ((MONIT2)27-CO-59(N,G)27-CO-60,,RI)",
    ))?;
    let headings: Vec<_> = two.monitors[&' '].iter().map(|m| m.heading.clone()).collect();
    assert_eq!(headings, vec![Some("MONIT1".to_string()), Some("MONIT2".to_string())]);
    assert_eq!(
        two.to_string(),
        "MONIT1: Resonance integral for 197Au(n,gamma)198Au; MONIT2: Resonance integral for 59Co(n,gamma)60Co"
    );

    let long = MonitorField::parse(&field(HEADED_MONITORS))?;
    let monitors = &long.monitors[&' '];
    assert_eq!(monitors[0].heading.as_deref(), Some("MONIT1"));
    assert_eq!(monitors[0].comment, "Monitor in form of alloy of 0.134% in thin Al metal foil");
    assert_eq!(monitors[1].heading.as_deref(), Some("MONIT3"));
    assert_eq!(
        monitors[1].comment,
        "Monitor in form of dilute  alloy  of 0.438% in thin Al metal foil"
    );
    Ok(())
}

#[test]
fn test_monitor_field_combination() -> Result<(), FieldError> {
    let combo = MonitorField::parse(&field(
        "MONITOR    ((29-CU-63(A,N+P)30-ZN-65,,TTY)+\n           (29-CU-63(A,2N)31-GA-65,,TTY))",
    ))?;
    let monitors = &combo.monitors[&' '];
    assert_eq!(monitors.len(), 1);
    assert!(matches!(monitors[0].measurement, Some(Measurement::Combination(_))));
    assert_eq!(
        monitors[0].measurement.as_ref().map(|m| m.reactions().len()),
        Some(2)
    );
    Ok(())
}
