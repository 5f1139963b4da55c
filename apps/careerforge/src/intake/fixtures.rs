// Fixture transcripts returned by the stand-in extractor for binary formats.

/// Returned for any PDF upload when the fixture backend is active.
pub const PDF_FIXTURE: &str = "ANANYA RAO
Software Engineer
ananya.rao@example.com | +1-555-0142 | LinkedIn: linkedin.com/in/ananyarao
Seattle, WA

PROFESSIONAL SUMMARY
Software engineer with 5 years of experience building full-stack web applications and cloud services. Focused on React, Node.js and AWS, with a track record of shipping scalable systems and mentoring junior engineers.

TECHNICAL SKILLS
- Languages: JavaScript, TypeScript, Python, Go, SQL
- Frontend: React, Next.js, HTML, CSS, Tailwind CSS
- Backend: Node.js, Express, Django
- Data: PostgreSQL, MongoDB, Redis
- Cloud & DevOps: AWS, Docker, Kubernetes, Git, CI/CD
- Testing: Jest, Cypress

PROFESSIONAL EXPERIENCE

Senior Software Engineer | Northwind Labs | Feb 2022 - Present
- Led development of a customer portal serving 150K+ monthly users
- Split a monolith into microservices, cutting p95 latency by 40%
- Mentored 4 engineers and ran the team's code review rotation

Software Engineer | Bluefin Systems | Jul 2019 - Jan 2022
- Built React front-ends and REST APIs in Node.js and Express
- Introduced contract tests that reduced production incidents by 60%

EDUCATION
B.S. in Computer Science
University of Washington | 2015 - 2019
GPA: 3.7/4.0

PROJECTS

Budget Tracker | Personal Project
- Full-stack expense tracker with React, Node.js and PostgreSQL
- Technologies: React, Node.js, PostgreSQL, Docker

CERTIFICATIONS
- AWS Certified Developer - Associate (2023)";

/// Returned for any Word upload when the fixture backend is active.
pub const WORD_FIXTURE: &str = "MARCUS OKAFOR
Product Manager
marcus.okafor@example.com | +1-555-0187 | LinkedIn: linkedin.com/in/marcusokafor
Austin, TX

PROFESSIONAL SUMMARY
Product manager with 7 years of experience leading cross-functional teams to launch consumer and B2B products. Strong in product strategy, user research and data-driven prioritization.

CORE COMPETENCIES
- Product Strategy
- User Research
- Agile
- Scrum
- Data Analysis
- A/B Testing
- Stakeholder Management

PROFESSIONAL EXPERIENCE

Senior Product Manager | Brightpath Software | Apr 2021 - Present
- Owned the roadmap for a mobile app with 600K+ active users
- Grew weekly engagement by 35% through experiment-driven feature work
- Coordinated engineering, design and marketing for 6 major launches

Product Manager | Tidewater Analytics | Jan 2018 - Mar 2021
- Launched a self-serve onboarding flow that reduced churn by 20%
- Introduced OKRs across 3 product teams

EDUCATION
MBA, Technology Management | University of Texas at Austin | 2016 - 2018
B.S. in Electrical Engineering | Texas A&M University | 2011 - 2015

TECHNICAL SKILLS
- Analytics: Google Analytics, Mixpanel, Tableau, SQL
- Design: Figma
- Delivery: Jira, Confluence";
