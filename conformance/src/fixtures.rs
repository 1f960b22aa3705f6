//! Thesaurus documents used to exercise the validators.
//!
//! Each constant holds text in the shape produced by the PDF-to-text step:
//! descriptor labels wrapped in `<bold>` markup, followed by their dates,
//! notes and relationship lines.

/// A small, well-formed excerpt: hierarchy, association, `USE`/`SEE`
/// redirects, forward references, dated and labeled entries.
pub const SAMPLE_THESAURUS: &str = "\
INIS: THESAURUS
IAEA-INIS-13 (Rev. 2)

<bold>ABSORPTION</bold> 1975
BT1 SORPTION
NT1 NEUTRON ABSORPTION
NT1 GAMMA ABSORPTION
RT ATTENUATION
<bold>ATTENUATION</bold>
(Of radiation in matter)
RT ABSORPTION
<bold>FISSION</bold>
USE NUCLEAR FISSION
<bold>GAMMA ABSORPTION</bold> INIS: 1980-03; ETDE: 1981
BT1 ABSORPTION
<bold>NEUTRON ABSORPTION</bold>
Capture of neutrons by nuclei.
BT1 ABSORPTION
UF neutron capture
<bold>NUCLEAR FISSION</bold> 1996-06-28
BT1 NUCLEAR REACTIONS
NT1 FAST FISSION
SF splitting
<bold>FAST FISSION</bold>
<bold>NUCLEAR REACTIONS</bold>
NT1 NUCLEAR FISSION
<bold>SORPTION</bold>
<bold>SPLITTING OF NUCLEI</bold>
SEE NUCLEAR FISSION
";

/// Two blocks referring to each other in a hierarchy cycle.
pub const CYCLIC_THESAURUS: &str = "\
<bold>A</bold>
BT B
<bold>B</bold>
BT A
";
