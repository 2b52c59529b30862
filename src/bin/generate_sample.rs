/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let departments = ["Engineering", "Sales", "Marketing", "HR", "Finance"];
    let job_titles = ["Developer", "Analyst", "Manager", "Designer", "Support"];
    let remote_frequencies = [0.0, 25.0, 50.0, 75.0, 100.0];

    let output_path = "sample_employees.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "Employee_ID",
            "Department",
            "Job_Title",
            "Hire_Date",
            "Performance_Score",
            "Employee_Satisfaction_Score",
            "Retension risk index",
            "Remote_Work_Frequency",
            "Productivity score",
            "Remote_Work_Efficiency",
        ])
        .expect("Failed to write header");

    let n_rows = 200;
    for i in 0..n_rows {
        let id = format!("E{:04}", i + 1);
        let department = *rng.pick(&departments);
        let job_title = *rng.pick(&job_titles);

        // 2010-2023, day-of-month kept small so every date is valid.
        let hire_date = if i % 37 == 0 {
            // A few unparseable dates to exercise the tolerant loader.
            "unknown".to_string()
        } else {
            format!(
                "{}-{:02}-{:02}",
                2010 + (rng.next_u64() % 14),
                1 + (rng.next_u64() % 12),
                1 + (rng.next_u64() % 28),
            )
        };

        // Guarantee some alert candidates: Low satisfaction + High risk.
        let (satisfaction, risk) = if i % 23 == 0 {
            (rng.range(1.0, 2.9), rng.range(1.5, 2.0))
        } else {
            (rng.range(1.0, 5.0), rng.range(0.0, 2.0))
        };

        // Hit the Medium boundary exactly now and then.
        let performance = if i % 11 == 0 { 3.0 } else { rng.range(1.0, 5.0) };

        writer
            .write_record([
                id.as_str(),
                department,
                job_title,
                hire_date.as_str(),
                &format!("{performance:.1}"),
                &format!("{satisfaction:.1}"),
                &format!("{risk:.2}"),
                &format!("{}", rng.pick(&remote_frequencies)),
                &format!("{:.1}", rng.range(40.0, 100.0)),
                &format!("{:.1}", rng.range(50.0, 100.0)),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} employees to {output_path}");
}
