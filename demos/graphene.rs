use std::{ fs, path::PathBuf };
use tunnelspace::{
    tightbinding::{ LatticeParameters, TightBinding },
    validate::validate_band_structure,
};

// bands and density of states of graphene, with and without second-neighbor
// hopping

fn main() {
    for t_prime in [0.0, 0.27] {
        let tb = TightBinding::new(
            LatticeParameters { t_prime, ..Default::default() });

        let dirac = tb.validate_dirac_point();
        println!("t' = {:.2} eV", t_prime);
        println!("  |f1(K)|   = {:.3e}", dirac.f1_at_k);
        println!("  gap at K  = {:.3e} eV", dirac.gap_at_k);
        println!("  E(K)      = {:.3e} eV", dirac.energy_at_k);

        let bands = tb.calculate_band_structure(100);
        let symmetry = [tb.gamma(), tb.k_point(), tb.m_point()];
        let check = validate_band_structure(
            &bands.path.k_points, &bands.energies(), &symmetry);
        println!("  min gap   = {:.3e} t", check.get("minBandGap").unwrap());

        let dos = tb.calculate_dos((-4.0, 4.0), 400, 300).unwrap();
        let (peak_idx, _)
            = dos.dos.iter().enumerate()
            .fold((0, f64::NEG_INFINITY), |(imax, dmax), (i, d)| {
                if *d > dmax { (i, *d) } else { (imax, dmax) }
            });
        println!("  DOS peak  at E = {:.3} t", dos.energies[peak_idx]);

        let outfile = PathBuf::from(format!("graphene_tp{:.2}.json", t_prime));
        let data = serde_json::json!({
            "params": tb.params(),
            "bands": bands,
            "dos": dos,
        });
        fs::write(outfile, data.to_string()).unwrap();
    }
}
